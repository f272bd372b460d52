//! Painted overlays for the 3D viewport

use glam::Vec3;
use lk_renderer::Camera;

use crate::state::SharedViewportState;

const OVERLAY_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(30, 30, 30, 220);

/// Render camera settings overlay in the top-right corner
pub fn render_camera_settings(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    viewport_state: &SharedViewportState,
    show_camera_settings: &mut bool,
) {
    let panel_width = 180.0;
    let panel_margin = 10.0;

    let toggle_pos = egui::pos2(rect.right() - panel_margin - 28.0, rect.top() + panel_margin);

    egui::Area::new(egui::Id::new("camera_toggle"))
        .fixed_pos(toggle_pos)
        .order(egui::Order::Foreground)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style())
                .fill(OVERLAY_FILL)
                .rounding(4.0)
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(60)))
                .inner_margin(2.0)
                .show(ui, |ui| {
                    let button = egui::Button::new("📷")
                        .selected(*show_camera_settings)
                        .min_size(egui::vec2(24.0, 24.0));
                    if ui.add(button).on_hover_text("Camera Settings").clicked() {
                        *show_camera_settings = !*show_camera_settings;
                    }
                });
        });

    if !*show_camera_settings {
        return;
    }

    let panel_pos = egui::pos2(
        rect.right() - panel_width - panel_margin,
        rect.top() + panel_margin + 36.0,
    );

    egui::Area::new(egui::Id::new("camera_settings_overlay"))
        .fixed_pos(panel_pos)
        .order(egui::Order::Foreground)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style())
                .fill(OVERLAY_FILL)
                .rounding(4.0)
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(60)))
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.set_width(panel_width - 16.0);
                    ui.strong("Camera");
                    ui.separator();

                    let mut vp = viewport_state.lock();
                    let camera = vp.renderer.camera_mut();

                    ui.horizontal(|ui| {
                        ui.label("FOV");
                        let mut fov = camera.fov.to_degrees();
                        if ui
                            .add(
                                egui::Slider::new(&mut fov, 10.0..=120.0)
                                    .fixed_decimals(0)
                                    .suffix("°"),
                            )
                            .changed()
                        {
                            camera.fov = fov.to_radians();
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Near");
                        ui.add(
                            egui::DragValue::new(&mut camera.near)
                                .speed(0.01)
                                .range(0.001..=10.0),
                        );
                    });

                    ui.horizontal(|ui| {
                        ui.label("Far");
                        ui.add(
                            egui::DragValue::new(&mut camera.far)
                                .speed(10.0)
                                .range(100.0..=100000.0),
                        );
                    });

                    ui.separator();

                    ui.horizontal(|ui| {
                        ui.label("Distance");
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(format!("{:.1}", camera.distance));
                        });
                    });
                });
        });
}

/// Render axes indicator in the bottom-right corner
pub fn render_axes_indicator(ui: &mut egui::Ui, rect: egui::Rect, forward: Vec3) {
    let painter = ui.painter();
    let axes_center = rect.right_bottom() - egui::vec2(50.0, 50.0);
    let axis_len = 30.0;

    // Y is up
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    if right == Vec3::ZERO {
        return;
    }
    let up = right.cross(forward).normalize();

    let project_axis = |world_axis: Vec3| -> (egui::Vec2, f32) {
        let x = world_axis.dot(right);
        let y = world_axis.dot(up);
        let z = world_axis.dot(forward);
        (egui::vec2(x * axis_len, -y * axis_len), z)
    };

    let (x_dir, x_depth) = project_axis(Vec3::X);
    let (y_dir, y_depth) = project_axis(Vec3::Y);
    let (z_dir, z_depth) = project_axis(Vec3::Z);

    let mut axes = [
        (x_depth, x_dir, "X", egui::Color32::from_rgb(255, 68, 68)),
        (y_depth, y_dir, "Y", egui::Color32::from_rgb(68, 255, 68)),
        (z_depth, z_dir, "Z", egui::Color32::from_rgb(68, 68, 255)),
    ];
    // Farthest first so nearer axes paint over
    axes.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_depth, dir, label, color) in axes {
        painter.line_segment([axes_center, axes_center + dir], egui::Stroke::new(2.0, color));

        let label_offset = dir.normalized() * 8.0;
        painter.text(
            axes_center + dir + label_offset,
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::default(),
            color,
        );
    }
}

/// Paint landmark names beside their markers
pub fn render_landmark_labels(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    camera: &Camera,
    labels: &[(String, Vec3)],
) {
    let painter = ui.painter_at(rect);
    for (text, position) in labels {
        let Some((x, y)) = camera.world_to_screen(*position, rect.width(), rect.height()) else {
            continue;
        };
        let anchor = rect.min + egui::vec2(x + 8.0, y - 8.0);
        if !rect.contains(anchor) {
            continue;
        }
        painter.text(
            anchor,
            egui::Align2::LEFT_BOTTOM,
            text,
            egui::FontId::proportional(12.0),
            egui::Color32::WHITE,
        );
    }
}
