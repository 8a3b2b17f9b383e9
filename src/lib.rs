//! Event handling and style synchronization for the quick reply menu.
//!
//! The crate keeps the style panel's redundant controls (color picker, hex
//! text, opacity slider and label) consistent with one canonical style model,
//! stores that model in the host's settings object and mirrors it onto the
//! page as CSS custom properties.
//!
//! Layout:
//! - `models`: color codec, style model, host settings, app config
//! - `system`: control surface interface and element ids
//! - `state`: field sync, style panel controller, menu visibility
//! - `render`: live CSS variable applier
//! - `views`: egui panel backed by an in-memory surface

pub mod models;
pub mod render;
pub mod state;
pub mod system;
pub mod views;

pub use models::style::{StyleModel, StyleSlot};
pub use state::StylePanelController;
