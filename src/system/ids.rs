//! Fixed element identifiers shared with the host page.
//!
//! Per-slot ids live on [`crate::models::style::StyleSlot`].

/// Style panel container.
pub const STYLE_PANEL: &str = "qr-style-panel";

/// Button that opens the style panel.
pub const STYLE_OPEN_BUTTON: &str = "qr-style-open";
pub const STYLE_APPLY_BUTTON: &str = "qr-style-apply";
pub const STYLE_RESET_BUTTON: &str = "qr-style-reset";
pub const STYLE_CLOSE_BUTTON: &str = "qr-style-close";

/// Root element of the rendered quick reply menu.
pub const MENU_ROOT: &str = "quick-reply-menu";

pub const PICKER_SUFFIX: &str = "-picker";
pub const TEXT_SUFFIX: &str = "-text";

pub fn picker_id(base: &str) -> String {
    format!("{}{}", base, PICKER_SUFFIX)
}

pub fn text_id(base: &str) -> String {
    format!("{}{}", base, TEXT_SUFFIX)
}
