//! Pushes the style model onto the live page as CSS custom properties.

use crate::models::style::{StyleModel, StyleSlot};
use crate::system::ids;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

/// Document-wide style scope (`:root` in a browser).
pub trait StyleScope {
    fn has_element(&self, id: &str) -> bool;
    fn set_property(&mut self, name: &str, value: &str);
}

pub struct LiveStyleApplier;

impl LiveStyleApplier {
    /// Sets every slot's CSS variable. Does nothing and returns `false` when
    /// the menu has not been built yet.
    pub fn render(model: &StyleModel, scope: &mut dyn StyleScope) -> bool {
        if !scope.has_element(ids::MENU_ROOT) {
            log::debug!("LIVE: menu root not present, skipping style render");
            return false;
        }

        for slot in StyleSlot::ALL {
            let value = model.get(slot);
            if value.trim().is_empty() {
                scope.set_property(slot.css_var(), &slot.default_value());
            } else {
                scope.set_property(slot.css_var(), value);
            }
        }
        true
    }
}

/// In-memory style scope that can be dumped as a CSS block.
#[derive(Debug, Clone, Default)]
pub struct DocumentStyle {
    elements: BTreeSet<String>,
    properties: BTreeMap<String, String>,
}

impl DocumentStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document in which the quick reply menu already exists.
    pub fn with_menu() -> Self {
        let mut document = Self::new();
        document.add_element(ids::MENU_ROOT);
        document
    }

    pub fn add_element(&mut self, id: &str) {
        self.elements.insert(id.to_string());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// `:root { ... }` block with every property set so far.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.properties {
            let _ = writeln!(css, "    {}: {};", name, value);
        }
        css.push_str("}\n");
        css
    }
}

impl StyleScope for DocumentStyle {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }
}
