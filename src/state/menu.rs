//! Quick reply menu visibility and item activation.

use crate::system::ids;
use crate::system::surface::ControlSurface;

/// One entry of the menu: a quick reply `label` inside the set `set_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReplyItem {
    pub set_name: String,
    pub label: String,
}

impl QuickReplyItem {
    pub fn new(set_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            set_name: set_name.into(),
            label: label.into(),
        }
    }
}

/// Host API that actually runs a quick reply.
pub trait TriggerApi {
    fn execute(&mut self, set_name: &str, label: &str) -> Result<(), String>;
}

#[derive(Debug, Default)]
pub struct QuickReplyMenu {
    open: bool,
}

impl QuickReplyMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self, surface: &mut dyn ControlSurface) {
        self.set_open(true, surface);
    }

    pub fn close(&mut self, surface: &mut dyn ControlSurface) {
        self.set_open(false, surface);
    }

    pub fn toggle(&mut self, surface: &mut dyn ControlSurface) {
        let open = !self.open;
        self.set_open(open, surface);
    }

    /// Click anywhere on the page. Closes the menu unless the click landed
    /// inside it or on its toggle button.
    pub fn handle_outside_click(
        &mut self,
        inside_menu: bool,
        on_toggle: bool,
        surface: &mut dyn ControlSurface,
    ) {
        if self.open && !inside_menu && !on_toggle {
            log::debug!("MENU: outside click, closing");
            self.close(surface);
        }
    }

    /// Runs the item and closes the menu. A failing trigger is logged and
    /// swallowed so the menu stays usable.
    pub fn activate(
        &mut self,
        item: &QuickReplyItem,
        api: &mut dyn TriggerApi,
        surface: &mut dyn ControlSurface,
    ) {
        log::info!("MENU: triggering {}.{}", item.set_name, item.label);
        if let Err(e) = api.execute(&item.set_name, &item.label) {
            log::error!(
                "MENU: quick reply {}.{} failed: {}",
                item.set_name,
                item.label,
                e
            );
        }
        self.close(surface);
    }

    fn set_open(&mut self, open: bool, surface: &mut dyn ControlSurface) {
        self.open = open;
        surface.set_visible(ids::MENU_ROOT, open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::surface::MemorySurface;

    #[derive(Default)]
    struct RecordingApi {
        calls: Vec<(String, String)>,
        fail: bool,
    }

    impl TriggerApi for RecordingApi {
        fn execute(&mut self, set_name: &str, label: &str) -> Result<(), String> {
            self.calls.push((set_name.to_string(), label.to_string()));
            if self.fail {
                Err("no such quick reply".to_string())
            } else {
                Ok(())
            }
        }
    }

    fn page() -> MemorySurface {
        let mut surface = MemorySurface::new();
        surface.insert(ids::MENU_ROOT, "");
        surface
    }

    #[test]
    fn test_toggle() {
        let mut surface = page();
        let mut menu = QuickReplyMenu::new();

        menu.toggle(&mut surface);
        assert!(menu.is_open());
        assert!(surface.is_visible(ids::MENU_ROOT));

        menu.toggle(&mut surface);
        assert!(!menu.is_open());
        assert!(!surface.is_visible(ids::MENU_ROOT));
    }

    #[test]
    fn test_outside_click() {
        let mut surface = page();
        let mut menu = QuickReplyMenu::new();
        menu.open(&mut surface);

        menu.handle_outside_click(true, false, &mut surface);
        assert!(menu.is_open());
        menu.handle_outside_click(false, true, &mut surface);
        assert!(menu.is_open());
        menu.handle_outside_click(false, false, &mut surface);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_activate_dispatches_and_closes() {
        let mut surface = page();
        let mut menu = QuickReplyMenu::new();
        let mut api = RecordingApi::default();
        menu.open(&mut surface);

        menu.activate(&QuickReplyItem::new("Default", "Continue"), &mut api, &mut surface);

        assert_eq!(api.calls, vec![("Default".to_string(), "Continue".to_string())]);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_activate_failure_is_swallowed() {
        let mut surface = page();
        let mut menu = QuickReplyMenu::new();
        let mut api = RecordingApi {
            fail: true,
            ..Default::default()
        };
        menu.open(&mut surface);

        menu.activate(&QuickReplyItem::new("Set", "Missing"), &mut api, &mut surface);
        assert_eq!(api.calls.len(), 1);
        assert!(!menu.is_open());
    }
}
