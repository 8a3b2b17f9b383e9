//! Canonical menu style model.
//!
//! The host keeps the persisted styles as a JSON object under
//! `<extension>.menuStyles`. [`StyleModel`] is the typed view of that object:
//! it is built from it with [`StyleModel::load`] and written back into it, in
//! place, by [`StyleModel::apply`] and [`StyleModel::reset`].

use crate::models::color;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Obsolete boolean that older versions stored next to the colors.
pub const LEGACY_FOLLOW_THEME_KEY: &str = "followTheme";

pub const DEFAULT_ITEM_OPACITY: &str = "0.7";
pub const DEFAULT_MENU_OPACITY: &str = "0.85";

fn default_item_bg() -> String {
    "rgba(60, 60, 60, 0.7)".to_string()
}
fn default_item_text() -> String {
    "#FFFFFF".to_string()
}
fn default_title() -> String {
    "#CCCCCC".to_string()
}
fn default_title_border() -> String {
    "#444444".to_string()
}
fn default_empty_text() -> String {
    "#666666".to_string()
}
fn default_menu_bg() -> String {
    "rgba(0, 0, 0, 0.85)".to_string()
}
fn default_menu_border() -> String {
    "#555555".to_string()
}

/// Opacity slider bound to an alpha-bearing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpacitySpec {
    pub slider_id: &'static str,
    pub display_id: &'static str,
    pub default: &'static str,
}

/// Named style slots of the quick reply menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleSlot {
    ItemBg,
    ItemText,
    Title,
    TitleBorder,
    EmptyText,
    MenuBg,
    MenuBorder,
}

impl StyleSlot {
    pub const ALL: [StyleSlot; 7] = [
        StyleSlot::ItemBg,
        StyleSlot::ItemText,
        StyleSlot::Title,
        StyleSlot::TitleBorder,
        StyleSlot::EmptyText,
        StyleSlot::MenuBg,
        StyleSlot::MenuBorder,
    ];

    /// Key inside the persisted `menuStyles` object.
    pub fn key(self) -> &'static str {
        match self {
            StyleSlot::ItemBg => "itemBgColor",
            StyleSlot::ItemText => "itemTextColor",
            StyleSlot::Title => "titleColor",
            StyleSlot::TitleBorder => "titleBorderColor",
            StyleSlot::EmptyText => "emptyTextColor",
            StyleSlot::MenuBg => "menuBgColor",
            StyleSlot::MenuBorder => "menuBorderColor",
        }
    }

    /// CSS custom property fed by this slot.
    pub fn css_var(self) -> &'static str {
        match self {
            StyleSlot::ItemBg => "--qr-item-bg-color",
            StyleSlot::ItemText => "--qr-item-text-color",
            StyleSlot::Title => "--qr-title-color",
            StyleSlot::TitleBorder => "--qr-title-border-color",
            StyleSlot::EmptyText => "--qr-empty-text-color",
            StyleSlot::MenuBg => "--qr-menu-bg-color",
            StyleSlot::MenuBorder => "--qr-menu-border-color",
        }
    }

    /// Base id of the picker/text pair (`<base>-picker`, `<base>-text`).
    pub fn field_id(self) -> &'static str {
        match self {
            StyleSlot::ItemBg => "qr-item-bg-color",
            StyleSlot::ItemText => "qr-item-text-color",
            StyleSlot::Title => "qr-title-color",
            StyleSlot::TitleBorder => "qr-title-border-color",
            StyleSlot::EmptyText => "qr-empty-text-color",
            StyleSlot::MenuBg => "qr-menu-bg-color",
            StyleSlot::MenuBorder => "qr-menu-border-color",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StyleSlot::ItemBg => "Item background",
            StyleSlot::ItemText => "Item text",
            StyleSlot::Title => "Title",
            StyleSlot::TitleBorder => "Title border",
            StyleSlot::EmptyText => "Empty state text",
            StyleSlot::MenuBg => "Menu background",
            StyleSlot::MenuBorder => "Menu border",
        }
    }

    pub fn opacity(self) -> Option<OpacitySpec> {
        match self {
            StyleSlot::ItemBg => Some(OpacitySpec {
                slider_id: "qr-item-opacity",
                display_id: "qr-item-opacity-value",
                default: DEFAULT_ITEM_OPACITY,
            }),
            StyleSlot::MenuBg => Some(OpacitySpec {
                slider_id: "qr-menu-opacity",
                display_id: "qr-menu-opacity-value",
                default: DEFAULT_MENU_OPACITY,
            }),
            _ => None,
        }
    }

    pub fn has_alpha(self) -> bool {
        self.opacity().is_some()
    }

    /// Compiled-in default. Always a fresh allocation.
    pub fn default_value(self) -> String {
        match self {
            StyleSlot::ItemBg => default_item_bg(),
            StyleSlot::ItemText => default_item_text(),
            StyleSlot::Title => default_title(),
            StyleSlot::TitleBorder => default_title_border(),
            StyleSlot::EmptyText => default_empty_text(),
            StyleSlot::MenuBg => default_menu_bg(),
            StyleSlot::MenuBorder => default_menu_border(),
        }
    }

    /// Hex part of the default, used when no control yields a color.
    pub fn default_hex(self) -> String {
        color::decode(&self.default_value()).hex
    }
}

/// Colors and opacities read off the panel controls, already validated.
///
/// A slot missing from `colors` (or `opacities`) had no usable control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub colors: BTreeMap<StyleSlot, String>,
    /// Raw slider text, passed to the codec untouched.
    pub opacities: BTreeMap<StyleSlot, String>,
}

impl FormValues {
    pub fn with_color(mut self, slot: StyleSlot, hex: impl Into<String>) -> Self {
        self.colors.insert(slot, hex.into());
        self
    }

    pub fn with_opacity(mut self, slot: StyleSlot, opacity: impl Into<String>) -> Self {
        self.opacities.insert(slot, opacity.into());
        self
    }
}

/// Typed menu style configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleModel {
    #[serde(default = "default_item_bg")]
    pub item_bg_color: String,

    #[serde(default = "default_item_text")]
    pub item_text_color: String,

    #[serde(default = "default_title")]
    pub title_color: String,

    #[serde(default = "default_title_border")]
    pub title_border_color: String,

    #[serde(default = "default_empty_text")]
    pub empty_text_color: String,

    #[serde(default = "default_menu_bg")]
    pub menu_bg_color: String,

    #[serde(default = "default_menu_border")]
    pub menu_border_color: String,

    /// Legacy flag carried over from old settings until the next apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_theme: Option<bool>,
}

impl Default for StyleModel {
    fn default() -> Self {
        Self {
            item_bg_color: default_item_bg(),
            item_text_color: default_item_text(),
            title_color: default_title(),
            title_border_color: default_title_border(),
            empty_text_color: default_empty_text(),
            menu_bg_color: default_menu_bg(),
            menu_border_color: default_menu_border(),
            follow_theme: None,
        }
    }
}

impl StyleModel {
    pub fn get(&self, slot: StyleSlot) -> &str {
        match slot {
            StyleSlot::ItemBg => &self.item_bg_color,
            StyleSlot::ItemText => &self.item_text_color,
            StyleSlot::Title => &self.title_color,
            StyleSlot::TitleBorder => &self.title_border_color,
            StyleSlot::EmptyText => &self.empty_text_color,
            StyleSlot::MenuBg => &self.menu_bg_color,
            StyleSlot::MenuBorder => &self.menu_border_color,
        }
    }

    pub fn set(&mut self, slot: StyleSlot, value: String) {
        let field = match slot {
            StyleSlot::ItemBg => &mut self.item_bg_color,
            StyleSlot::ItemText => &mut self.item_text_color,
            StyleSlot::Title => &mut self.title_color,
            StyleSlot::TitleBorder => &mut self.title_border_color,
            StyleSlot::EmptyText => &mut self.empty_text_color,
            StyleSlot::MenuBg => &mut self.menu_bg_color,
            StyleSlot::MenuBorder => &mut self.menu_border_color,
        };
        *field = value;
    }

    /// Builds the model from the persisted `menuStyles` object.
    ///
    /// String values win, anything else (absent, number, null) falls back to
    /// the compiled default. Alpha slots still holding a bare hex from before
    /// opacity existed are upgraded to `rgba(...)` with the slot's default
    /// opacity.
    pub fn load(persisted: &Map<String, Value>) -> Self {
        let mut model = Self::default();
        for slot in StyleSlot::ALL {
            if let Some(value) = persisted.get(slot.key()).and_then(Value::as_str) {
                model.set(slot, migrate_value(slot, value));
            }
        }
        model.follow_theme = persisted
            .get(LEGACY_FOLLOW_THEME_KEY)
            .and_then(Value::as_bool);
        model
    }

    /// Recomputes every slot from the panel values and writes the result
    /// into `store`. The legacy `followTheme` key is always removed.
    pub fn apply(store: &mut Map<String, Value>, form: &FormValues) -> Self {
        let mut model = Self::default();
        for slot in StyleSlot::ALL {
            let hex = form
                .colors
                .get(&slot)
                .cloned()
                .unwrap_or_else(|| slot.default_hex());

            let value = match slot.opacity() {
                Some(spec) => {
                    let opacity = form
                        .opacities
                        .get(&slot)
                        .map(String::as_str)
                        .unwrap_or(spec.default);
                    color::encode(&hex, opacity)
                }
                None => hex,
            };
            model.set(slot, value);
        }

        model.write_to(store);
        log::info!("STYLE: applied menu styles");
        model
    }

    /// Replaces the whole store with fresh defaults.
    pub fn reset(store: &mut Map<String, Value>) -> Self {
        store.clear();
        let model = Self::default();
        model.write_to(store);
        log::info!("STYLE: menu styles reset to defaults");
        model
    }

    /// Writes all slots into `store` and drops the legacy flag.
    pub fn write_to(&self, store: &mut Map<String, Value>) {
        for slot in StyleSlot::ALL {
            store.insert(slot.key().to_string(), Value::String(self.get(slot).to_string()));
        }
        if store.remove(LEGACY_FOLLOW_THEME_KEY).is_some() {
            log::debug!("STYLE: dropped legacy {} flag", LEGACY_FOLLOW_THEME_KEY);
        }
    }
}

fn migrate_value(slot: StyleSlot, value: &str) -> String {
    let Some(spec) = slot.opacity() else {
        return value.to_string();
    };
    if color::is_rgb_function(value) {
        return value.to_string();
    }
    if color::is_hex_color(value.trim()) {
        log::debug!("STYLE: upgrading bare hex {} for {}", value, slot.key());
        return color::encode(value.trim(), spec.default);
    }
    log::warn!(
        "STYLE: unreadable {} value {:?}, using default",
        slot.key(),
        value
    );
    slot.default_value()
}
