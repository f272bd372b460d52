//! Landmark name buttons and the line update button

use lk_core::LandmarkName;

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};

const ARMED_FILL: egui::Color32 = egui::Color32::BLACK;
const ARMED_TEXT: egui::Color32 = egui::Color32::WHITE;
const IDLE_FILL: egui::Color32 = egui::Color32::from_rgb(211, 211, 211);
const IDLE_TEXT: egui::Color32 = egui::Color32::BLACK;

/// Landmark palette panel
pub struct LandmarkPalettePanel;

impl LandmarkPalettePanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LandmarkPalettePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for LandmarkPalettePanel {
    fn name(&self) -> &str {
        "Landmarks"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let (armed, dragging, count) = {
            let state = app_state.lock();
            (
                state.session.armed(),
                state.session.dragging(),
                state.session.store().len(),
            )
        };

        let button_size = egui::vec2(ui.available_width(), 28.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            for name in LandmarkName::ALL {
                let is_armed = armed == Some(*name);
                let (fill, text) = if is_armed {
                    (ARMED_FILL, ARMED_TEXT)
                } else {
                    (IDLE_FILL, IDLE_TEXT)
                };

                let button = egui::Button::new(egui::RichText::new(name.label()).color(text))
                    .fill(fill)
                    .min_size(button_size);
                if ui
                    .add(button)
                    .on_hover_text("Click, then click on a bone to place")
                    .clicked()
                {
                    app_state.lock().queue_action(AppAction::ArmLandmark(*name));
                }
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            let update = egui::Button::new(egui::RichText::new("Update").strong())
                .min_size(button_size);
            if ui
                .add(update)
                .on_hover_text("Draw axis lines between landmark pairs")
                .clicked()
            {
                app_state.lock().queue_action(AppAction::UpdateLines);
            }

            ui.add_space(8.0);
            match (armed, dragging) {
                (Some(name), _) => {
                    ui.label(format!("Placing: {}", name));
                }
                (None, Some(index)) => {
                    ui.label(format!("Moving landmark #{}", index));
                }
                (None, None) => {
                    ui.weak(format!("{} landmarks placed", count));
                }
            }
        });
    }
}
