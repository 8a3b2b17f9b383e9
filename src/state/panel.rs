//! Style panel controller.
//!
//! Owns the panel visibility and orchestrates the three flows:
//! - open: persisted styles → controls
//! - apply: controls → persisted styles → live page, then close
//! - reset: defaults → persisted styles → controls + live page

use crate::models::color;
use crate::models::style::{StyleModel, StyleSlot};
use crate::render::live::{LiveStyleApplier, StyleScope};
use crate::state::field_sync::{self, FieldPair, OpacityControl};
use crate::system::ids;
use crate::system::surface::{ControlEvent, ControlSurface, MemorySurface};
use serde_json::{Map, Value};

pub const UNSAVED_NOTICE: &str = "Menu style applied. Save your settings to keep it.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// User-facing toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Host toast facility.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Sends notices to the log when no toast facility exists.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => log::info!("NOTICE: {}", notice.message),
            NoticeLevel::Warning => log::warn!("NOTICE: {}", notice.message),
        }
    }
}

/// Everything a panel operation may touch, passed in per call.
pub struct PanelContext<'a> {
    /// The host's persisted `menuStyles` object, edited in place.
    pub styles: &'a mut Map<String, Value>,
    pub surface: &'a mut dyn ControlSurface,
    pub scope: &'a mut dyn StyleScope,
    pub notifier: &'a mut dyn Notifier,
}

pub struct StylePanelController {
    visibility: PanelVisibility,
    fields: Vec<(StyleSlot, FieldPair)>,
    opacities: Vec<(StyleSlot, OpacityControl)>,
}

impl StylePanelController {
    pub fn new() -> Self {
        let fields = StyleSlot::ALL
            .into_iter()
            .map(|slot| (slot, FieldPair::for_slot(slot)))
            .collect();
        let opacities = StyleSlot::ALL
            .into_iter()
            .filter_map(|slot| slot.opacity().map(|spec| (slot, OpacityControl::new(spec))))
            .collect();
        Self {
            visibility: PanelVisibility::Hidden,
            fields,
            opacities,
        }
    }

    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == PanelVisibility::Visible
    }

    /// Seeds every text field from its picker and every label from its
    /// slider. Called once when the panel markup is created.
    pub fn init(&mut self, surface: &mut dyn ControlSurface) {
        for (_, field) in &self.fields {
            field.seed(surface);
        }
        for (_, control) in &self.opacities {
            control.sync_display(surface);
        }
        surface.set_visible(ids::STYLE_PANEL, false);
        self.visibility = PanelVisibility::Hidden;
    }

    /// Shows the panel filled with the persisted styles. Any unapplied edit
    /// from a previous session is discarded.
    pub fn open(&mut self, styles: &Map<String, Value>, surface: &mut dyn ControlSurface) -> StyleModel {
        let model = StyleModel::load(styles);
        self.load_controls(&model, surface);
        surface.set_visible(ids::STYLE_PANEL, true);
        self.visibility = PanelVisibility::Visible;
        model
    }

    pub fn close(&mut self, surface: &mut dyn ControlSurface) {
        surface.set_visible(ids::STYLE_PANEL, false);
        self.visibility = PanelVisibility::Hidden;
    }

    /// Reads the controls, stores the result, renders it and hides the
    /// panel. The host still has to save its settings.
    pub fn apply_and_close(&mut self, ctx: &mut PanelContext) -> StyleModel {
        let form = field_sync::read_form(&*ctx.surface);
        let model = StyleModel::apply(ctx.styles, &form);
        LiveStyleApplier::render(&model, ctx.scope);
        self.close(ctx.surface);
        ctx.notifier.notify(Notice::info(UNSAVED_NOTICE));
        model
    }

    /// Restores defaults into the store, the controls and the live page.
    /// Visibility is left as is.
    pub fn reset_and_reload(&mut self, ctx: &mut PanelContext) -> StyleModel {
        let model = StyleModel::reset(ctx.styles);
        self.load_controls(&model, ctx.surface);
        LiveStyleApplier::render(&model, ctx.scope);
        model
    }

    /// Writes a model into the controls.
    pub fn load_controls(&self, model: &StyleModel, surface: &mut dyn ControlSurface) {
        for (slot, field) in &self.fields {
            let decoded = color::decode(model.get(*slot));
            field.set_hex(surface, &decoded.hex);
        }
        for (slot, control) in &self.opacities {
            let decoded = color::decode(model.get(*slot));
            let opacity = match (decoded.opacity, slot.opacity()) {
                (Some(opacity), _) => opacity.to_string(),
                (None, Some(spec)) => spec.default.to_string(),
                (None, None) => continue,
            };
            control.set(surface, &opacity);
        }
    }

    /// Routes a control event. Returns `false` when the event does not
    /// belong to the style panel.
    pub fn handle_event(&mut self, event: &ControlEvent, ctx: &mut PanelContext) -> bool {
        match event {
            ControlEvent::Click(id) => match id.as_str() {
                ids::STYLE_OPEN_BUTTON => {
                    self.open(ctx.styles, ctx.surface);
                    true
                }
                ids::STYLE_APPLY_BUTTON => {
                    self.apply_and_close(ctx);
                    true
                }
                ids::STYLE_RESET_BUTTON => {
                    self.reset_and_reload(ctx);
                    true
                }
                ids::STYLE_CLOSE_BUTTON => {
                    self.close(ctx.surface);
                    true
                }
                _ => false,
            },
            ControlEvent::Change(id) => match self.field_by_picker(id) {
                Some(field) => {
                    field.on_picker_change(ctx.surface);
                    true
                }
                None => false,
            },
            ControlEvent::Input(id) => {
                if let Some(field) = self.field_by_text(id) {
                    field.on_text_input(ctx.surface);
                    return true;
                }
                match self.opacity_by_slider(id) {
                    Some(control) => {
                        control.sync_display(ctx.surface);
                        true
                    }
                    None => false,
                }
            }
            ControlEvent::Commit(id) => match self.field_by_text(id) {
                Some(field) => {
                    field.on_text_commit(ctx.surface);
                    true
                }
                None => false,
            },
        }
    }

    fn field_by_picker(&self, id: &str) -> Option<&FieldPair> {
        self.fields
            .iter()
            .map(|(_, field)| field)
            .find(|field| field.picker_id() == id)
    }

    fn field_by_text(&self, id: &str) -> Option<&FieldPair> {
        self.fields
            .iter()
            .map(|(_, field)| field)
            .find(|field| field.text_id() == id)
    }

    fn opacity_by_slider(&self, id: &str) -> Option<&OpacityControl> {
        self.opacities
            .iter()
            .map(|(_, control)| control)
            .find(|control| control.slider_id() == id)
    }
}

impl Default for StylePanelController {
    fn default() -> Self {
        Self::new()
    }
}

/// A surface holding every control of the style panel, as the host markup
/// would create it.
pub fn panel_surface() -> MemorySurface {
    let mut surface = MemorySurface::new();
    for id in [
        ids::STYLE_PANEL,
        ids::STYLE_OPEN_BUTTON,
        ids::STYLE_APPLY_BUTTON,
        ids::STYLE_RESET_BUTTON,
        ids::STYLE_CLOSE_BUTTON,
    ] {
        surface.insert(id, "");
    }
    for slot in StyleSlot::ALL {
        let field = FieldPair::for_slot(slot);
        surface.insert(field.picker_id(), "#000000");
        surface.insert(field.text_id(), "");
        if let Some(spec) = slot.opacity() {
            surface.insert(spec.slider_id, spec.default);
            surface.insert(spec.display_id, "");
        }
    }
    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::live::DocumentStyle;
    use serde_json::json;

    struct Page {
        styles: Map<String, Value>,
        surface: MemorySurface,
        document: DocumentStyle,
        notices: Vec<Notice>,
    }

    impl Page {
        fn new(styles: Value) -> Self {
            let styles = match styles {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            Self {
                styles,
                surface: panel_surface(),
                document: DocumentStyle::with_menu(),
                notices: Vec::new(),
            }
        }

        fn ctx(&mut self) -> PanelContext<'_> {
            PanelContext {
                styles: &mut self.styles,
                surface: &mut self.surface,
                scope: &mut self.document,
                notifier: &mut self.notices,
            }
        }
    }

    fn send(controller: &mut StylePanelController, page: &mut Page, event: ControlEvent) -> bool {
        let mut ctx = page.ctx();
        controller.handle_event(&event, &mut ctx)
    }

    #[test]
    fn test_initial_state_hidden() {
        let mut controller = StylePanelController::new();
        let mut surface = panel_surface();
        controller.init(&mut surface);
        assert_eq!(controller.visibility(), PanelVisibility::Hidden);
        assert_eq!(
            surface.get("qr-title-color-text").as_deref(),
            Some("#000000")
        );
        assert_eq!(surface.get("qr-item-opacity-value").as_deref(), Some("0.7"));
    }

    #[test]
    fn test_open_shows_persisted_values() {
        let mut controller = StylePanelController::new();
        let mut page = Page::new(json!({ "itemBgColor": "rgba(10,20,30,0.5)" }));

        let model = controller.open(&page.styles, &mut page.surface);

        assert_eq!(model.item_bg_color, "rgba(10,20,30,0.5)");
        assert!(controller.is_visible());
        assert!(page.surface.is_visible(ids::STYLE_PANEL));
        assert_eq!(page.surface.get("qr-item-bg-color-picker").as_deref(), Some("#0A141E"));
        assert_eq!(page.surface.get("qr-item-bg-color-text").as_deref(), Some("#0A141E"));
        assert_eq!(page.surface.get("qr-item-opacity").as_deref(), Some("0.5"));
        assert_eq!(page.surface.get("qr-item-opacity-value").as_deref(), Some("0.5"));
        assert_eq!(page.surface.get("qr-menu-opacity").as_deref(), Some("0.85"));
        assert_eq!(page.surface.get("qr-title-color-picker").as_deref(), Some("#CCCCCC"));
    }

    #[test]
    fn test_apply_from_typed_text() {
        let mut controller = StylePanelController::new();
        let mut page = Page::new(json!({ "followTheme": true }));
        controller.open(&page.styles, &mut page.surface);

        page.surface.set("qr-item-bg-color-text", "ff00ff");
        assert!(send(&mut controller, &mut page, ControlEvent::Input("qr-item-bg-color-text".into())));
        page.surface.set("qr-item-opacity", "0.9");
        assert!(send(&mut controller, &mut page, ControlEvent::Input("qr-item-opacity".into())));
        assert_eq!(page.surface.get("qr-item-opacity-value").as_deref(), Some("0.9"));

        assert!(send(&mut controller, &mut page, ControlEvent::Click(ids::STYLE_APPLY_BUTTON.into())));

        assert_eq!(page.styles["itemBgColor"], json!("rgba(255, 0, 255, 0.9)"));
        assert!(!page.styles.contains_key("followTheme"));
        assert_eq!(
            page.document.property("--qr-item-bg-color"),
            Some("rgba(255, 0, 255, 0.9)")
        );
        assert_eq!(controller.visibility(), PanelVisibility::Hidden);
        assert_eq!(page.notices, vec![Notice::info(UNSAVED_NOTICE)]);
    }

    #[test]
    fn test_apply_with_invalid_text_uses_picker() {
        let mut controller = StylePanelController::new();
        let mut page = Page::new(json!({}));
        controller.open(&page.styles, &mut page.surface);

        page.surface.set("qr-title-color-text", "#12");
        send(&mut controller, &mut page, ControlEvent::Input("qr-title-color-text".into()));
        let model = controller.apply_and_close(&mut page.ctx());

        assert_eq!(model.title_color, "#CCCCCC");
    }

    #[test]
    fn test_reset_keeps_visibility_and_restores_defaults() {
        let mut controller = StylePanelController::new();
        let mut page = Page::new(json!({ "menuBorderColor": "#010101", "followTheme": false }));
        controller.open(&page.styles, &mut page.surface);

        send(&mut controller, &mut page, ControlEvent::Click(ids::STYLE_RESET_BUTTON.into()));

        assert!(controller.is_visible());
        assert_eq!(StyleModel::load(&page.styles), StyleModel::default());
        assert!(!page.styles.contains_key("followTheme"));
        assert_eq!(page.surface.get("qr-menu-border-color-text").as_deref(), Some("#555555"));
        assert_eq!(page.document.property("--qr-menu-border-color"), Some("#555555"));
        assert!(page.notices.is_empty());
    }

    #[test]
    fn test_close_does_not_touch_store() {
        let mut controller = StylePanelController::new();
        let mut page = Page::new(json!({ "titleColor": "#101010" }));
        controller.open(&page.styles, &mut page.surface);
        page.surface.set("qr-title-color-text", "#FFFFFF");
        send(&mut controller, &mut page, ControlEvent::Input("qr-title-color-text".into()));

        send(&mut controller, &mut page, ControlEvent::Click(ids::STYLE_CLOSE_BUTTON.into()));

        assert!(!controller.is_visible());
        assert_eq!(page.styles["titleColor"], json!("#101010"));

        controller.open(&page.styles, &mut page.surface);
        assert_eq!(page.surface.get("qr-title-color-text").as_deref(), Some("#101010"));
    }

    #[test]
    fn test_picker_change_and_commit_routing() {
        let mut controller = StylePanelController::new();
        let mut page = Page::new(json!({}));
        controller.open(&page.styles, &mut page.surface);

        page.surface.set("qr-empty-text-color-picker", "#00ff00");
        assert!(send(&mut controller, &mut page, ControlEvent::Change("qr-empty-text-color-picker".into())));
        assert_eq!(page.surface.get("qr-empty-text-color-text").as_deref(), Some("#00FF00"));

        page.surface.set("qr-empty-text-color-text", "bogus");
        assert!(send(&mut controller, &mut page, ControlEvent::Commit("qr-empty-text-color-text".into())));
        assert_eq!(page.surface.get("qr-empty-text-color-text").as_deref(), Some("#00FF00"));

        assert!(!send(&mut controller, &mut page, ControlEvent::Click("unrelated".into())));
    }

    #[test]
    fn test_apply_without_menu_root_still_stores() {
        let mut controller = StylePanelController::new();
        let mut page = Page::new(json!({}));
        page.document = DocumentStyle::new();
        controller.open(&page.styles, &mut page.surface);

        controller.apply_and_close(&mut page.ctx());

        assert!(page.document.properties().is_empty());
        assert_eq!(page.styles.len(), StyleSlot::ALL.len());
    }

    #[test]
    fn test_missing_controls_fall_back_to_defaults() {
        let mut controller = StylePanelController::new();
        let mut page = Page::new(json!({}));
        page.surface = MemorySurface::new();

        let model = controller.apply_and_close(&mut page.ctx());
        assert_eq!(model, StyleModel::default());
    }
}
