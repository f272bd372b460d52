//! 3D Viewport panel

mod camera_overlay;

use lk_core::{BoneKind, LandmarkStore, Ray, pick_landmark};
use lk_renderer::GizmoAxis;

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState, SharedViewportState};

use camera_overlay::{render_axes_indicator, render_camera_settings, render_landmark_labels};

/// 3D viewport panel
pub struct ViewportPanel {
    hovered_axis: GizmoAxis,
    show_camera_settings: bool,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            hovered_axis: GizmoAxis::None,
            show_camera_settings: false,
        }
    }

    fn toolbar(
        &self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        viewport_state: &SharedViewportState,
    ) {
        ui.horizontal(|ui| {
            ui.label("View:");
            let mut vp = viewport_state.lock();
            if ui.button("Front").clicked() {
                vp.renderer.camera_mut().set_front_view();
            }
            if ui.button("Top").clicked() {
                vp.renderer.camera_mut().set_top_view();
            }
            if ui.button("Side").clicked() {
                vp.renderer.camera_mut().set_side_view();
            }
            if ui.button("Fit Bones").clicked() {
                let bounds = app_state.lock().session.scene().bone_bounds();
                if !bounds.is_empty() {
                    vp.fit_camera(bounds.center(), bounds.radius());
                }
            }
            if ui.button("Reset").clicked() {
                vp.renderer.camera_mut().reset();
            }
        });
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ViewportPanel {
    fn name(&self) -> &str {
        "3D Viewport"
    }

    fn needs_render_context(&self) -> bool {
        true
    }

    fn ui(&mut self, ui: &mut egui::Ui, _app_state: &SharedAppState) {
        // Fallback when no render context
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::hover());

        painter.rect_filled(response.rect, 0.0, egui::Color32::from_rgb(30, 30, 30));
        painter.text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            "3D Viewport\n(WebGPU not available)",
            egui::FontId::proportional(16.0),
            egui::Color32::GRAY,
        );
    }

    fn ui_with_render_context(
        &mut self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        render_state: &egui_wgpu::RenderState,
        viewport_state: &SharedViewportState,
    ) {
        self.toolbar(ui, app_state, viewport_state);

        let available_size = ui.available_size();
        let width = available_size.x as u32;
        let height = available_size.y as u32;

        if width == 0 || height == 0 {
            return;
        }

        // Ensure texture and render
        let texture_id = {
            let mut state = viewport_state.lock();
            let mut egui_renderer = render_state.renderer.write();
            let tex_id = state.ensure_texture(width, height, &mut egui_renderer);
            state.render();
            tex_id
        };

        let response = ui.add(
            egui::Image::new(egui::load::SizedTexture::new(
                texture_id,
                [available_size.x, available_size.y],
            ))
            .sense(egui::Sense::click_and_drag()),
        );

        let (loading, orbit_enabled, dragging, show_labels, missing_bones) = {
            let state = app_state.lock();
            (
                state.loading,
                state.session.orbit_enabled(),
                state.session.dragging(),
                state.show_labels,
                state.missing_bones(),
            )
        };

        if loading {
            ui.painter().text(
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                "Loading...",
                egui::FontId::proportional(20.0),
                egui::Color32::WHITE,
            );
            return;
        }

        if let Some(hint) = missing_bones_hint(&missing_bones) {
            ui.painter().text(
                response.rect.left_top() + egui::vec2(10.0, 10.0),
                egui::Align2::LEFT_TOP,
                hint,
                egui::FontId::proportional(14.0),
                egui::Color32::from_rgb(255, 200, 80),
            );
        }

        // Get mouse position relative to viewport
        let mouse_pos = response.hover_pos().or(response.interact_pointer_pos());
        let local_mouse = mouse_pos.map(|p| p - response.rect.min);
        let (w, h) = (available_size.x, available_size.y);

        let mut vp = viewport_state.lock();

        if let Some(pos) = local_mouse {
            // Hover: gizmo handles first, then markers
            if !vp.is_dragging_gizmo() {
                let hit_axis = vp.gizmo_hit_test(pos.x, pos.y, w, h);
                if hit_axis != self.hovered_axis {
                    self.hovered_axis = hit_axis;
                    let queue = vp.queue.clone();
                    vp.renderer.set_gizmo_highlight(&queue, hit_axis);
                }
            }

            let ray = vp.screen_ray(pos.x, pos.y, w, h);
            let hovered_marker = if self.hovered_axis == GizmoAxis::None {
                marker_under_pointer(
                    app_state.lock().session.store(),
                    &ray,
                    vp.marker_radius(),
                    vp.renderer.show_markers(),
                )
            } else {
                None
            };
            if response.hovered() {
                app_state.lock().hovered_landmark = hovered_marker;
            }

            if response.clicked_by(egui::PointerButton::Primary)
                && self.hovered_axis == GizmoAxis::None
            {
                app_state
                    .lock()
                    .queue_action(click_action(hovered_marker, dragging, ray));
            }

            if response.drag_started_by(egui::PointerButton::Primary)
                && self.hovered_axis != GizmoAxis::None
            {
                vp.start_gizmo_drag(self.hovered_axis, pos.x, pos.y, w, h);
            }

            if vp.is_dragging_gizmo() && response.dragged_by(egui::PointerButton::Primary) {
                if let (Some(position), Some(index)) =
                    (vp.update_gizmo_drag(pos.x, pos.y, w, h), vp.gizmo.landmark)
                {
                    app_state
                        .lock()
                        .queue_action(AppAction::MoveLandmark { index, position });
                }
            }

            if response.drag_stopped_by(egui::PointerButton::Primary) && vp.is_dragging_gizmo() {
                vp.end_gizmo_drag();
                app_state.lock().queue_action(AppAction::EndDrag);
            }
        } else if response.hovered() {
            app_state.lock().hovered_landmark = None;
        }

        // Camera controls are suspended while a landmark is captured
        if orbit_enabled && !vp.is_dragging_gizmo() {
            let sensitivity = vp.camera_config().clone();
            let delta = response.drag_delta();

            let orbit_drag = response.dragged_by(egui::PointerButton::Primary)
                || response.dragged_by(egui::PointerButton::Secondary)
                || (response.dragged_by(egui::PointerButton::Middle)
                    && !ui.input(|i| i.modifiers.shift));
            let pan_drag =
                response.dragged_by(egui::PointerButton::Middle) && ui.input(|i| i.modifiers.shift);

            if pan_drag {
                vp.renderer
                    .camera_mut()
                    .pan(delta.x, delta.y, sensitivity.pan_sensitivity);
            } else if orbit_drag {
                vp.renderer.camera_mut().orbit(
                    -delta.x * sensitivity.orbit_sensitivity,
                    delta.y * sensitivity.orbit_sensitivity,
                );
            }

            if response.hovered() {
                let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll_delta != 0.0 {
                    vp.renderer
                        .camera_mut()
                        .zoom(scroll_delta * 0.01, sensitivity.zoom_sensitivity);
                }
            }
        }

        let forward = vp.renderer.camera().forward();
        let labels: Vec<_> = if show_labels {
            app_state
                .lock()
                .session
                .store()
                .iter()
                .map(|l| (l.name.label().to_string(), l.position))
                .collect()
        } else {
            Vec::new()
        };
        if !labels.is_empty() && vp.renderer.show_markers() {
            render_landmark_labels(ui, response.rect, vp.renderer.camera(), &labels);
        }
        drop(vp);

        render_axes_indicator(ui, response.rect, forward);
        render_camera_settings(ui, response.rect, viewport_state, &mut self.show_camera_settings);
    }
}

/// Status line naming the bones that still need a mesh
fn missing_bones_hint(missing: &[BoneKind]) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    let names: Vec<&str> = missing.iter().map(|kind| kind.name()).collect();
    Some(format!("No {} mesh loaded (File menu to open)", names.join(" or ")))
}

/// Landmark marker hit by `ray`; hidden markers cannot be picked
fn marker_under_pointer(
    store: &LandmarkStore,
    ray: &Ray,
    radius: f32,
    markers_visible: bool,
) -> Option<usize> {
    if !markers_visible {
        return None;
    }
    pick_landmark(store, ray, radius)
}

/// Action for a primary click that missed the gizmo handles
fn click_action(hovered_marker: Option<usize>, dragging: Option<usize>, ray: Ray) -> AppAction {
    match (hovered_marker, dragging) {
        (Some(index), _) => AppAction::SelectLandmark(index),
        (None, Some(_)) => AppAction::Deselect,
        (None, None) => AppAction::PlaceAt(ray),
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use lk_core::LandmarkName;

    use super::*;

    fn store_with_marker_at_origin() -> LandmarkStore {
        let mut store = LandmarkStore::new();
        store.append(LandmarkName::HipCenter, Vec3::ZERO);
        store
    }

    fn down_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_click_on_visible_marker_selects_it() {
        let store = store_with_marker_at_origin();
        let ray = down_ray();

        let marker = marker_under_pointer(&store, &ray, 0.5, true);
        assert_eq!(marker, Some(0));
        assert!(matches!(
            click_action(marker, None, ray),
            AppAction::SelectLandmark(0)
        ));
    }

    #[test]
    fn test_click_on_hidden_marker_places() {
        let store = store_with_marker_at_origin();
        let ray = down_ray();

        let marker = marker_under_pointer(&store, &ray, 0.5, false);
        assert_eq!(marker, None);
        assert!(matches!(
            click_action(marker, None, ray),
            AppAction::PlaceAt(_)
        ));
    }

    #[test]
    fn test_missing_bones_hint() {
        assert_eq!(missing_bones_hint(&[]), None);
        assert_eq!(
            missing_bones_hint(&[BoneKind::Femur, BoneKind::Tibia]).as_deref(),
            Some("No Femur or Tibia mesh loaded (File menu to open)")
        );
    }

    #[test]
    fn test_empty_click_while_dragging_deselects() {
        assert!(matches!(
            click_action(None, Some(2), down_ray()),
            AppAction::Deselect
        ));
    }
}
