//! Orbit camera for 3D viewport
//!
//! Y is up. `yaw` turns around Y starting from +Z, `pitch` lifts towards +Y.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use lk_core::Ray;

use crate::config::CameraConfig;
use crate::constants::camera::{
    FIT_ALL_MULTIPLIER, MAX_DISTANCE, MAX_PITCH_DEGREES, MIN_DISTANCE, MIN_PITCH_DEGREES,
};

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// View matrix.
    pub view: [[f32; 4]; 4],
    /// Projection matrix.
    pub proj: [[f32; 4]; 4],
    /// Eye position (w = 1).
    pub eye: [f32; 4],
}

/// Orbit camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position, derived from the orbit state
    pub position: Vec3,
    /// Look-at point
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Orbit yaw in radians
    pub yaw: f32,
    /// Orbit pitch in radians
    pub pitch: f32,
    /// Orbit distance from target
    pub distance: f32,
    home: (Vec3, Vec3),
}

impl Camera {
    /// Create a camera with default parameters
    pub fn new(aspect: f32) -> Self {
        Self::from_config(&CameraConfig::default(), aspect)
    }

    /// Create a camera at the configured eye position looking at the configured target
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let position = Vec3::from(config.position);
        let target = Vec3::from(config.target);

        let mut camera = Self {
            position,
            target,
            up: Vec3::Y,
            fov: config.fov_degrees.to_radians(),
            aspect,
            near: config.near_plane,
            far: config.far_plane,
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            home: (position, target),
        };
        camera.look_from(position, target);
        camera
    }

    /// Place the eye at `position` looking at `target`
    pub fn look_from(&mut self, position: Vec3, target: Vec3) {
        let offset = position - target;
        self.target = target;
        self.distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(MIN_PITCH_DEGREES.to_radians(), MAX_PITCH_DEGREES.to_radians());
        self.update_position_from_orbit();
    }

    /// Return to the configured start pose
    pub fn reset(&mut self) {
        let (position, target) = self.home;
        self.look_from(position, target);
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(
            MIN_PITCH_DEGREES.to_radians(),
            MAX_PITCH_DEGREES.to_radians(),
        );
        self.update_position_from_orbit();
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * sensitivity;
        self.target += right * (-delta_x * scale) + up * (delta_y * scale);
        self.update_position_from_orbit();
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32, sensitivity: f32) {
        self.distance =
            (self.distance * (1.0 - delta * sensitivity)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.update_position_from_orbit();
    }

    /// Unit vector from eye to target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Fit camera to show the given bounding sphere
    pub fn fit_all(&mut self, center: Vec3, radius: f32) {
        self.target = center;
        self.distance = (radius * FIT_ALL_MULTIPLIER).max(1.0);
        self.update_position_from_orbit();
    }

    /// Set to top view
    pub fn set_top_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = MAX_PITCH_DEGREES.to_radians();
        self.update_position_from_orbit();
    }

    /// Set to front view
    pub fn set_front_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.update_position_from_orbit();
    }

    /// Set to side view
    pub fn set_side_view(&mut self) {
        self.yaw = 90.0_f32.to_radians();
        self.pitch = 0.0;
        self.update_position_from_orbit();
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Projection times view
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get camera uniform data
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        let view_proj = proj * view;

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }

    /// Convert screen coordinates to a world ray
    pub fn screen_to_ray(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> Ray {
        Ray::from_screen(
            screen_x,
            screen_y,
            screen_width,
            screen_height,
            self.view_projection(),
        )
    }

    /// Project a world point to screen pixels, `None` when behind the eye
    pub fn world_to_screen(
        &self,
        point: Vec3,
        screen_width: f32,
        screen_height: f32,
    ) -> Option<(f32, f32)> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some((
            (ndc.x + 1.0) * 0.5 * screen_width,
            (1.0 - ndc.y) * 0.5 * screen_height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_configured_position() {
        let camera = Camera::new(1.0);
        assert!((camera.position - Vec3::new(10.0, 0.0, 100.0)).length() < 1e-3);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new(16.0 / 9.0);
        let ray = camera.screen_to_ray(800.0, 450.0, 1600.0, 900.0);
        assert!(ray.direction.dot(camera.forward()) > 0.9999);
    }

    #[test]
    fn test_world_to_screen_inverts_screen_to_ray() {
        let camera = Camera::new(1.0);
        let ray = camera.screen_to_ray(120.0, 340.0, 500.0, 500.0);
        let (x, y) = camera
            .world_to_screen(ray.at(50.0), 500.0, 500.0)
            .unwrap();
        assert!((x - 120.0).abs() < 0.1);
        assert!((y - 340.0).abs() < 0.1);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = Camera::new(1.0);
        let before = camera.distance;
        camera.orbit(0.7, -0.3);
        assert!(((camera.position - camera.target).length() - before).abs() < 1e-3);
    }

    #[test]
    fn test_reset_restores_home() {
        let mut camera = Camera::new(1.0);
        camera.orbit(1.0, 0.5);
        camera.pan(30.0, 10.0, 0.002);
        camera.reset();
        assert!((camera.position - Vec3::new(10.0, 0.0, 100.0)).length() < 1e-3);
    }
}
