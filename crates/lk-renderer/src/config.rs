//! Renderer configuration structures
//!
//! Settings that can be serialized and loaded from the application config file.

use serde::{Deserialize, Serialize};

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
    /// MSAA sample count (1 = disabled, 4)
    pub msaa_sample_count: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            background_color: [0.15, 0.15, 0.18, 1.0],
            msaa_sample_count: 4,
        }
    }
}

impl ViewportConfig {
    /// Sample count clamped to what every backend supports
    pub fn sample_count(&self) -> u32 {
        if self.msaa_sample_count >= 4 { 4 } else { 1 }
    }
}

/// Lighting configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightingConfig {
    /// Light position; the light shines from here towards the origin
    pub position: [f32; 3],
    /// Light color (RGB)
    pub color: [f32; 3],
    /// Light intensity multiplier
    pub intensity: f32,
    /// Ambient light color (RGB)
    pub ambient_color: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            position: [-5.0, 5.0, 5.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            ambient_color: [1.0, 1.0, 1.0],
            ambient_strength: 0.5,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Initial eye position
    pub position: [f32; 3],
    /// Initial look-at target
    pub target: [f32; 3],
    /// Pan sensitivity multiplier
    pub pan_sensitivity: f32,
    /// Zoom sensitivity multiplier
    pub zoom_sensitivity: f32,
    /// Orbit sensitivity multiplier
    pub orbit_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            position: [10.0, 0.0, 100.0],
            target: [0.0, 0.0, 0.0],
            pan_sensitivity: 0.002,
            zoom_sensitivity: 0.1,
            orbit_sensitivity: 0.005,
        }
    }
}

/// Landmark marker configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerConfig {
    /// Sphere radius in world units
    pub radius: f32,
    /// Resting color (RGBA)
    pub color: [f32; 4],
    /// Color of the landmark under the pointer (RGBA)
    pub hover_color: [f32; 4],
    /// Color of the landmark being dragged (RGBA)
    pub selected_color: [f32; 4],
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            color: [0.0, 0.0, 1.0, 1.0],
            hover_color: [0.3, 0.6, 1.0, 1.0],
            selected_color: [1.0, 0.85, 0.2, 1.0],
        }
    }
}

/// Axis line configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineConfig {
    /// Line color (RGBA)
    pub color: [f32; 4],
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            color: [0.0, 1.0, 0.0, 1.0],
        }
    }
}

/// Gizmo configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GizmoConfig {
    /// Whether the drag gizmo is shown
    pub enabled: bool,
    /// Gizmo scale multiplier
    pub scale: f32,
    /// X-axis color (RGBA)
    pub x_axis_color: [f32; 4],
    /// Y-axis color (RGBA)
    pub y_axis_color: [f32; 4],
    /// Z-axis color (RGBA)
    pub z_axis_color: [f32; 4],
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 1.0,
            x_axis_color: [1.0, 0.2, 0.2, 1.0],
            y_axis_color: [0.2, 1.0, 0.2, 1.0],
            z_axis_color: [0.2, 0.2, 1.0, 1.0],
        }
    }
}

impl GizmoConfig {
    /// Arrow colors in X, Y, Z order
    pub fn axis_colors(&self) -> [[f32; 4]; 3] {
        [self.x_axis_color, self.y_axis_color, self.z_axis_color]
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Lighting settings
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Landmark marker settings
    #[serde(default)]
    pub marker: MarkerConfig,
    /// Axis line settings
    #[serde(default)]
    pub line: LineConfig,
    /// Gizmo settings
    #[serde(default)]
    pub gizmo: GizmoConfig,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear color as a wgpu color
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.viewport.background_color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scene_setup() {
        let config = RendererConfig::new();
        assert_eq!(config.camera.position, [10.0, 0.0, 100.0]);
        assert_eq!(config.marker.radius, 0.5);
        assert_eq!(config.marker.color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(config.line.color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(config.lighting.ambient_strength, 0.5);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: RendererConfig = ron::from_str("(marker: (radius: 1.0, color: (1.0, 0.0, 0.0, 1.0), hover_color: (1.0, 1.0, 1.0, 1.0), selected_color: (1.0, 1.0, 0.0, 1.0)))").unwrap();
        assert_eq!(config.marker.radius, 1.0);
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.line, LineConfig::default());
    }

    #[test]
    fn test_sample_count_is_clamped() {
        let mut viewport = ViewportConfig::default();
        assert_eq!(viewport.sample_count(), 4);
        viewport.msaa_sample_count = 2;
        assert_eq!(viewport.sample_count(), 1);
        viewport.msaa_sample_count = 8;
        assert_eq!(viewport.sample_count(), 4);
    }
}
