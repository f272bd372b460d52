//! Placed landmarks and axis status

use lk_core::AXIS_DEFINITIONS;

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};

/// Landmark list panel
pub struct LandmarkListPanel;

impl LandmarkListPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LandmarkListPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for LandmarkListPanel {
    fn name(&self) -> &str {
        "Placed"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let mut clicked = None;
        let mut hovered = None;

        {
            let state = app_state.lock();
            let session = &state.session;
            let dragging = session.dragging();

            ui.strong("Landmarks");
            ui.separator();

            if session.store().is_empty() {
                ui.weak("No landmarks yet");
            }

            egui::ScrollArea::vertical()
                .id_salt("landmark_rows")
                .max_height(ui.available_height() * 0.6)
                .show(ui, |ui| {
                    for (index, landmark) in session.store().iter().enumerate() {
                        let p = landmark.position;
                        let text = format!(
                            "#{} {}  ({:.1}, {:.1}, {:.1})",
                            index, landmark.name, p.x, p.y, p.z
                        );
                        let response = ui.selectable_label(dragging == Some(index), text);
                        if response.clicked() {
                            clicked = Some(index);
                        }
                        if response.hovered() {
                            hovered = Some(index);
                        }
                    }
                });

            ui.add_space(12.0);
            ui.strong("Axes");
            ui.separator();

            egui::Grid::new("axis_status_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for axis in AXIS_DEFINITIONS.iter() {
                        ui.label(axis.label);
                        if session.lines().iter().any(|l| l.label == axis.label) {
                            ui.colored_label(egui::Color32::from_rgb(0, 200, 0), "drawn");
                        } else if axis.is_resolvable(session.store()) {
                            ui.label("ready");
                        } else {
                            ui.weak(format!("needs #{} and #{}", axis.start_index, axis.end_index));
                        }
                        ui.end_row();
                    }
                });
        }

        let mut state = app_state.lock();
        if hovered.is_some() || ui.ui_contains_pointer() {
            state.hovered_landmark = hovered;
        }
        if let Some(index) = clicked {
            state.queue_action(AppAction::SelectLandmark(index));
        }
    }
}
