//! Keeps each picker/text pair and each opacity slider/label pair in step.
//!
//! The text field wins whenever it holds a valid 6-digit hex; otherwise the
//! picker is the source of truth. Invalid text is tolerated while typing and
//! only reverted on commit.

use crate::models::color;
use crate::models::style::{FormValues, OpacitySpec, StyleSlot};
use crate::system::ids;
use crate::system::surface::ControlSurface;

/// A color picker and its free-text twin sharing a base id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPair {
    picker_id: String,
    text_id: String,
}

impl FieldPair {
    pub fn new(base: &str) -> Self {
        Self {
            picker_id: ids::picker_id(base),
            text_id: ids::text_id(base),
        }
    }

    pub fn for_slot(slot: StyleSlot) -> Self {
        Self::new(slot.field_id())
    }

    pub fn picker_id(&self) -> &str {
        &self.picker_id
    }

    pub fn text_id(&self) -> &str {
        &self.text_id
    }

    /// Copies the picker value into the text field.
    pub fn seed(&self, surface: &mut dyn ControlSurface) {
        self.copy_picker_to_text(surface);
    }

    pub fn on_picker_change(&self, surface: &mut dyn ControlSurface) {
        self.copy_picker_to_text(surface);
    }

    /// Live keystroke handler. Only a valid hex is propagated.
    pub fn on_text_input(&self, surface: &mut dyn ControlSurface) {
        let Some(text) = surface.get(&self.text_id) else {
            return;
        };
        if let Some(hex) = color::normalize_hex_input(&text) {
            self.push(surface, &hex);
        }
    }

    /// Commit handler: a valid hex is normalized into both controls, an
    /// invalid one is discarded in favor of the picker.
    pub fn on_text_commit(&self, surface: &mut dyn ControlSurface) {
        let Some(text) = surface.get(&self.text_id) else {
            return;
        };
        match color::normalize_hex_input(&text) {
            Some(hex) => self.push(surface, &hex),
            None => {
                log::debug!("SYNC: reverting {} from {:?}", self.text_id, text);
                self.copy_picker_to_text(surface);
            }
        }
    }

    /// Writes a hex into both controls. The text field gets the uppercase
    /// form, the picker gets it as is.
    pub fn set_hex(&self, surface: &mut dyn ControlSurface, hex: &str) {
        surface.set(&self.picker_id, hex);
        surface.set(&self.text_id, &hex.to_ascii_uppercase());
    }

    /// The color this pair currently denotes, if any control yields one.
    pub fn resolve(&self, surface: &dyn ControlSurface) -> Option<String> {
        if let Some(hex) = surface
            .get(&self.text_id)
            .and_then(|text| color::normalize_hex_input(&text))
        {
            return Some(hex);
        }
        surface
            .get(&self.picker_id)
            .filter(|picker| color::is_hex_color(picker))
            .map(|picker| picker.to_ascii_uppercase())
    }

    fn push(&self, surface: &mut dyn ControlSurface, hex: &str) {
        surface.set(&self.picker_id, hex);
        surface.set(&self.text_id, hex);
    }

    fn copy_picker_to_text(&self, surface: &mut dyn ControlSurface) {
        if let Some(picker) = surface.get(&self.picker_id) {
            surface.set(&self.text_id, &picker.to_ascii_uppercase());
        }
    }
}

/// Opacity slider with a read-only label that mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpacityControl {
    spec: OpacitySpec,
}

impl OpacityControl {
    pub fn new(spec: OpacitySpec) -> Self {
        Self { spec }
    }

    pub fn slider_id(&self) -> &'static str {
        self.spec.slider_id
    }

    pub fn sync_display(&self, surface: &mut dyn ControlSurface) {
        if let Some(value) = surface.get(self.spec.slider_id) {
            surface.set(self.spec.display_id, &value);
        }
    }

    pub fn set(&self, surface: &mut dyn ControlSurface, opacity: &str) {
        surface.set(self.spec.slider_id, opacity);
        self.sync_display(surface);
    }

    /// Raw slider text, or `None` when the slider is absent.
    pub fn read(&self, surface: &dyn ControlSurface) -> Option<String> {
        surface.get(self.spec.slider_id)
    }
}

/// Snapshots every slot's resolved color and opacity off the controls.
pub fn read_form(surface: &dyn ControlSurface) -> FormValues {
    let mut form = FormValues::default();
    for slot in StyleSlot::ALL {
        if let Some(hex) = FieldPair::for_slot(slot).resolve(surface) {
            form.colors.insert(slot, hex);
        }
        if let Some(opacity) = slot
            .opacity()
            .and_then(|spec| OpacityControl::new(spec).read(surface))
        {
            form.opacities.insert(slot, opacity);
        }
    }
    form
}
