//! Viewport rendering state

use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;

use lk_core::{BoneMesh, Landmark, LineSegment, Ray, ray_plane_intersection};
use lk_renderer::config::{CameraConfig, LineConfig, MarkerConfig, RendererConfig};
use lk_renderer::{GizmoAxis, LineInstance, MarkerInstance, Renderer};

/// Render texture for viewport
struct RenderTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    egui_texture_id: egui::TextureId,
    width: u32,
    height: u32,
}

/// Gizmo interaction state
#[derive(Default)]
pub struct GizmoInteraction {
    pub dragging: bool,
    pub drag_axis: GizmoAxis,
    pub drag_start_pos: Vec3,
    /// Landmark the gizmo is attached to
    pub landmark: Option<usize>,
    pub gizmo_position: Vec3,
}

/// Viewport rendering state
pub struct ViewportState {
    pub renderer: Renderer,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    render_texture: Option<RenderTexture>,
    pub gizmo: GizmoInteraction,
    marker: MarkerConfig,
    line: LineConfig,
    camera: CameraConfig,
}

impl ViewportState {
    /// Create a new viewport state
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        config: &RendererConfig,
    ) -> Self {
        let renderer = Renderer::new(&device, format, 800, 600, config);
        Self {
            renderer,
            device,
            queue,
            render_texture: None,
            gizmo: GizmoInteraction::default(),
            marker: config.marker.clone(),
            line: config.line.clone(),
            camera: config.camera.clone(),
        }
    }

    /// Ensure the render texture matches the requested size
    pub fn ensure_texture(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> egui::TextureId {
        let width = width.max(1);
        let height = height.max(1);

        if let Some(rt) = &self.render_texture {
            if rt.width == width && rt.height == height {
                return rt.egui_texture_id;
            }
        }

        // Free old texture if exists
        if let Some(old) = self.render_texture.take() {
            egui_renderer.free_texture(&old.egui_texture_id);
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Viewport Render Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.renderer.format(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Register with egui
        let egui_texture_id =
            egui_renderer.register_native_texture(&self.device, &view, wgpu::FilterMode::Linear);

        self.renderer.resize(&self.device, width, height);

        self.render_texture = Some(RenderTexture {
            texture,
            view,
            egui_texture_id,
            width,
            height,
        });

        egui_texture_id
    }

    /// Render the 3D scene to the texture
    pub fn render(&mut self) {
        let Some(ref rt) = self.render_texture else {
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Render Encoder"),
            });

        self.renderer.render(&mut encoder, &rt.view, &self.queue);

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Upload or replace a bone mesh
    pub fn set_bone(&mut self, mesh: &BoneMesh) {
        self.renderer.set_bone(&self.device, mesh);
    }

    /// Frame the camera on a bounding sphere
    pub fn fit_camera(&mut self, center: Vec3, radius: f32) {
        self.renderer.camera_mut().fit_all(center, radius);
    }

    /// World ray under a viewport-local pointer position
    pub fn screen_ray(&self, screen_x: f32, screen_y: f32, width: f32, height: f32) -> Ray {
        self.renderer
            .camera()
            .screen_to_ray(screen_x, screen_y, width, height)
    }

    /// Orbit, pan and zoom sensitivities
    pub fn camera_config(&self) -> &CameraConfig {
        &self.camera
    }

    /// Marker radius used for drawing and picking
    pub fn marker_radius(&self) -> f32 {
        self.marker.radius
    }

    /// Rebuild marker instances.
    ///
    /// The hovered and dragged landmarks are drawn on top of the bones in
    /// their highlight colors.
    pub fn update_landmarks(
        &mut self,
        landmarks: &[Landmark],
        hovered: Option<usize>,
        dragging: Option<usize>,
    ) {
        let mut normal = Vec::with_capacity(landmarks.len());
        let mut highlighted = Vec::new();

        for (index, landmark) in landmarks.iter().enumerate() {
            if dragging == Some(index) {
                highlighted.push(MarkerInstance::new(
                    landmark.position,
                    self.marker.radius,
                    self.marker.selected_color,
                ));
            } else if hovered == Some(index) {
                highlighted.push(MarkerInstance::new(
                    landmark.position,
                    self.marker.radius,
                    self.marker.hover_color,
                ));
            } else {
                normal.push(MarkerInstance::new(
                    landmark.position,
                    self.marker.radius,
                    self.marker.color,
                ));
            }
        }

        self.renderer.update_markers(&self.queue, &normal, &highlighted);
    }

    /// Replace the drawn axis lines
    pub fn update_lines(&mut self, lines: &[LineSegment]) {
        let instances: Vec<LineInstance> = lines
            .iter()
            .map(|line| LineInstance::new(line.start, line.end, self.line.color))
            .collect();
        self.renderer.update_lines(&self.queue, &instances);
    }

    /// Attach the gizmo to a landmark, or hide it
    pub fn attach_gizmo(&mut self, target: Option<(usize, Vec3)>) {
        match target {
            Some((index, position)) => {
                // The drag owns the gizmo position until release
                if self.gizmo.dragging && self.gizmo.landmark == Some(index) {
                    return;
                }
                self.gizmo.landmark = Some(index);
                self.gizmo.gizmo_position = position;
                self.renderer.show_gizmo(&self.queue, position);
            }
            None => {
                if self.gizmo.landmark.is_some() {
                    self.hide_gizmo();
                }
            }
        }
    }

    /// Hide gizmo and drop any drag in progress
    pub fn hide_gizmo(&mut self) {
        self.gizmo = GizmoInteraction::default();
        self.renderer.hide_gizmo();
    }

    /// Gizmo handle under a viewport-local pointer position
    pub fn gizmo_hit_test(
        &self,
        screen_x: f32,
        screen_y: f32,
        width: f32,
        height: f32,
    ) -> GizmoAxis {
        let ray = self.screen_ray(screen_x, screen_y, width, height);
        self.renderer.gizmo_hit_test(&ray)
    }

    /// Start dragging along a gizmo handle
    pub fn start_gizmo_drag(
        &mut self,
        axis: GizmoAxis,
        screen_x: f32,
        screen_y: f32,
        width: f32,
        height: f32,
    ) {
        if axis == GizmoAxis::None || self.gizmo.landmark.is_none() {
            return;
        }

        let ray = self.screen_ray(screen_x, screen_y, width, height);
        let plane_normal = self.drag_plane_normal(axis);

        if let Some(t) = ray_plane_intersection(&ray, self.gizmo.gizmo_position, plane_normal) {
            self.gizmo.dragging = true;
            self.gizmo.drag_axis = axis;
            self.gizmo.drag_start_pos = ray.at(t);
            self.renderer.set_gizmo_highlight(&self.queue, axis);
        }
    }

    /// Update the drag; returns the new gizmo position when it moved
    pub fn update_gizmo_drag(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        width: f32,
        height: f32,
    ) -> Option<Vec3> {
        if !self.gizmo.dragging {
            return None;
        }

        let ray = self.screen_ray(screen_x, screen_y, width, height);
        let plane_normal = self.drag_plane_normal(self.gizmo.drag_axis);
        let t = ray_plane_intersection(&ray, self.gizmo.gizmo_position, plane_normal)?;
        let current_point = ray.at(t);

        let delta = current_point - self.gizmo.drag_start_pos;

        // Project delta onto the axis
        let axis_dir = self.gizmo.drag_axis.direction();
        let projected_delta = axis_dir * delta.dot(axis_dir);
        if projected_delta == Vec3::ZERO {
            return None;
        }

        self.gizmo.gizmo_position += projected_delta;
        self.gizmo.drag_start_pos = current_point;
        self.renderer
            .show_gizmo(&self.queue, self.gizmo.gizmo_position);

        Some(self.gizmo.gizmo_position)
    }

    /// End gizmo drag
    pub fn end_gizmo_drag(&mut self) {
        self.gizmo.dragging = false;
        self.gizmo.drag_axis = GizmoAxis::None;
        self.renderer
            .set_gizmo_highlight(&self.queue, GizmoAxis::None);
    }

    /// Check if currently dragging
    pub fn is_dragging_gizmo(&self) -> bool {
        self.gizmo.dragging
    }

    /// Plane containing the drag axis that faces the camera the most
    fn drag_plane_normal(&self, axis: GizmoAxis) -> Vec3 {
        drag_plane_normal(axis, self.renderer.camera().forward())
    }
}

fn drag_plane_normal(axis: GizmoAxis, camera_forward: Vec3) -> Vec3 {
    let f = camera_forward.abs();
    match axis {
        GizmoAxis::X => {
            if f.y > f.z {
                Vec3::Y
            } else {
                Vec3::Z
            }
        }
        GizmoAxis::Y => {
            if f.x > f.z {
                Vec3::X
            } else {
                Vec3::Z
            }
        }
        GizmoAxis::Z => {
            if f.x > f.y {
                Vec3::X
            } else {
                Vec3::Y
            }
        }
        GizmoAxis::None => camera_forward,
    }
}

pub type SharedViewportState = Arc<Mutex<ViewportState>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_plane_contains_axis() {
        let forward = Vec3::new(0.3, -0.2, -0.9).normalize();
        for axis in [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z] {
            let normal = drag_plane_normal(axis, forward);
            assert_eq!(normal.dot(axis.direction()), 0.0);
        }
    }

    #[test]
    fn test_drag_plane_faces_camera() {
        // Looking down -Z: X and Y handles drag in the XY plane
        let forward = Vec3::NEG_Z;
        assert_eq!(drag_plane_normal(GizmoAxis::X, forward), Vec3::Z);
        assert_eq!(drag_plane_normal(GizmoAxis::Y, forward), Vec3::Z);
    }
}
