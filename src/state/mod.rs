//! Event-driven state of the quick reply menu and its style panel.
//!
//! Everything here runs synchronously on the UI event thread: each handler
//! reads the controls, mutates state and returns before the next event.

pub mod field_sync;
pub mod menu;
pub mod panel;

pub use field_sync::{FieldPair, OpacityControl};
pub use menu::{QuickReplyItem, QuickReplyMenu, TriggerApi};
pub use panel::{
    LogNotifier, Notice, NoticeLevel, Notifier, PanelContext, PanelVisibility,
    StylePanelController,
};
