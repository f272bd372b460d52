//! Directional light with an ambient term

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::config::LightingConfig;

/// Light uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    /// Unit vector from the surface towards the light (w unused)
    pub direction: [f32; 4],
    /// Light color (rgb) and intensity (w)
    pub color: [f32; 4],
    /// Ambient color (rgb) and strength (w)
    pub ambient: [f32; 4],
}

/// Directional light shining from `position` towards the origin
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Light position
    pub position: Vec3,
    /// Light color
    pub color: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
    /// Ambient color
    pub ambient_color: Vec3,
    /// Ambient strength
    pub ambient_strength: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::from_config(&LightingConfig::default())
    }
}

impl DirectionalLight {
    /// Build from configuration
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            position: Vec3::from(config.position),
            color: Vec3::from(config.color),
            intensity: config.intensity,
            ambient_color: Vec3::from(config.ambient_color),
            ambient_strength: config.ambient_strength,
        }
    }

    /// Direction towards the light, falling back to +Y for a light at the origin
    pub fn direction(&self) -> Vec3 {
        let dir = self.position.normalize_or_zero();
        if dir == Vec3::ZERO { Vec3::Y } else { dir }
    }

    /// GPU representation
    pub fn uniform(&self) -> LightUniform {
        LightUniform {
            direction: self.direction().extend(0.0).to_array(),
            color: self.color.extend(self.intensity).to_array(),
            ambient: self.ambient_color.extend(self.ambient_strength).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_packs_intensity_and_ambient() {
        let light = DirectionalLight::default();
        let uniform = light.uniform();
        let dir = Vec3::new(-5.0, 5.0, 5.0).normalize();
        assert!((Vec3::new(uniform.direction[0], uniform.direction[1], uniform.direction[2]) - dir).length() < 1e-6);
        assert_eq!(uniform.color[3], 1.0);
        assert_eq!(uniform.ambient[3], 0.5);
    }

    #[test]
    fn test_light_at_origin_points_up() {
        let mut light = DirectionalLight::default();
        light.position = Vec3::ZERO;
        assert_eq!(light.direction(), Vec3::Y);
    }
}
