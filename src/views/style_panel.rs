//! egui rendition of the style panel.
//!
//! The window edits a [`MemorySurface`] directly and reports what happened as
//! [`ControlEvent`]s, which the caller feeds to
//! [`crate::state::StylePanelController::handle_event`]. No sync logic lives
//! here.

use crate::models::color;
use crate::models::style::{OpacitySpec, StyleSlot};
use crate::state::field_sync::FieldPair;
use crate::system::ids;
use crate::system::surface::{ControlEvent, ControlSurface, MemorySurface};
use egui::{Grid, RichText, Slider, TextEdit, Ui};

/// Draws the panel when it is visible and returns the events of this frame.
pub fn show_style_panel(ctx: &egui::Context, surface: &mut MemorySurface) -> Vec<ControlEvent> {
    let mut events = Vec::new();
    if !surface.is_visible(ids::STYLE_PANEL) {
        return events;
    }

    let mut open = true;
    egui::Window::new("Quick Reply Menu Style")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            Grid::new("qr_style_grid")
                .num_columns(3)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    for slot in StyleSlot::ALL {
                        color_row(ui, slot, surface, &mut events);
                        ui.end_row();
                        if let Some(spec) = slot.opacity() {
                            opacity_row(ui, spec, surface, &mut events);
                            ui.end_row();
                        }
                    }
                });

            ui.separator();
            ui.label(RichText::new("Applied styles still need a settings save.").small());
            ui.horizontal(|ui| {
                for (label, id) in [
                    ("Apply", ids::STYLE_APPLY_BUTTON),
                    ("Reset", ids::STYLE_RESET_BUTTON),
                    ("Close", ids::STYLE_CLOSE_BUTTON),
                ] {
                    if ui.button(label).clicked() {
                        events.push(ControlEvent::Click(id.to_string()));
                    }
                }
            });
        });

    // Title bar close button
    if !open {
        events.push(ControlEvent::Click(ids::STYLE_CLOSE_BUTTON.to_string()));
    }
    events
}

fn color_row(ui: &mut Ui, slot: StyleSlot, surface: &mut MemorySurface, events: &mut Vec<ControlEvent>) {
    let field = FieldPair::for_slot(slot);
    ui.label(slot.label());

    match surface.get(field.picker_id()) {
        Some(picker) => {
            let mut rgb = color::hex_to_rgb(&picker).unwrap_or([0, 0, 0]);
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                surface.set(field.picker_id(), &color::rgb_to_hex(rgb));
                events.push(ControlEvent::Change(field.picker_id().to_string()));
            }
        }
        None => {
            ui.label("-");
        }
    }

    match surface.get(field.text_id()) {
        Some(mut text) => {
            let response = ui.add(TextEdit::singleline(&mut text).desired_width(72.0));
            if response.changed() {
                surface.set(field.text_id(), &text);
                events.push(ControlEvent::Input(field.text_id().to_string()));
            }
            if response.lost_focus() {
                events.push(ControlEvent::Commit(field.text_id().to_string()));
            }
        }
        None => {
            ui.label("-");
        }
    }
}

fn opacity_row(ui: &mut Ui, spec: OpacitySpec, surface: &mut MemorySurface, events: &mut Vec<ControlEvent>) {
    ui.label("    Opacity");

    let Some(raw) = surface.get(spec.slider_id) else {
        ui.label("-");
        return;
    };
    let mut value = color::parse_opacity(&raw).unwrap_or(1.0);
    let slider = Slider::new(&mut value, 0.0..=1.0)
        .step_by(0.05)
        .show_value(false);
    if ui.add(slider).changed() {
        let rounded = (value * 100.0).round() / 100.0;
        surface.set(spec.slider_id, &rounded.to_string());
        events.push(ControlEvent::Input(spec.slider_id.to_string()));
    }

    ui.label(surface.get(spec.display_id).unwrap_or_default());
}
