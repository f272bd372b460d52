//! Application configuration
//!
//! Stored as RON. The path comes from `LK_CONFIG`, falling back to `lk.ron`
//! in the working directory.

use std::path::{Path, PathBuf};

use lk_core::BoneKind;
use lk_renderer::RendererConfig;
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "LK_CONFIG";

/// Config file used when `LK_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "lk.ron";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Renderer settings
    pub renderer: RendererConfig,
    /// Femur STL path
    pub femur_path: String,
    /// Tibia STL path
    pub tibia_path: String,
    /// Femur surface color (RGBA)
    pub femur_color: [f32; 4],
    /// Tibia surface color (RGBA)
    pub tibia_color: [f32; 4],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            renderer: RendererConfig::default(),
            femur_path: BoneKind::Femur.default_path().to_string(),
            tibia_path: BoneKind::Tibia.default_path().to_string(),
            femur_color: BoneKind::Femur.default_color(),
            tibia_color: BoneKind::Tibia.default_color(),
        }
    }
}

impl AppConfig {
    /// Path the config is read from and saved to
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from [`AppConfig::path`]; defaults when missing or unreadable
    pub fn load_or_default() -> Self {
        let path = Self::path();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Mesh path for a bone
    pub fn bone_path(&self, kind: BoneKind) -> &str {
        match kind {
            BoneKind::Femur => &self.femur_path,
            BoneKind::Tibia => &self.tibia_path,
        }
    }

    /// Surface color for a bone
    pub fn bone_color(&self, kind: BoneKind) -> [f32; 4] {
        match kind {
            BoneKind::Femur => self.femur_color,
            BoneKind::Tibia => self.tibia_color,
        }
    }

    /// Set the mesh path for a bone
    pub fn set_bone_path(&mut self, kind: BoneKind, path: impl Into<String>) {
        let path = path.into();
        match kind {
            BoneKind::Femur => self.femur_path = path,
            BoneKind::Tibia => self.tibia_path = path,
        }
    }

    /// Set the surface color for a bone
    pub fn set_bone_color(&mut self, kind: BoneKind, color: [f32; 4]) {
        match kind {
            BoneKind::Femur => self.femur_color = color,
            BoneKind::Tibia => self.tibia_color = color,
        }
    }
}

/// Config errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bone_paths() {
        let config = AppConfig::default();
        assert_eq!(config.bone_path(BoneKind::Femur), "models/Right_Femur.stl");
        assert_eq!(config.bone_path(BoneKind::Tibia), "models/Right_Tibia.stl");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lk.ron");

        let mut config = AppConfig::default();
        config.set_bone_path(BoneKind::Tibia, "scans/left_tibia.stl");
        config.set_bone_color(BoneKind::Femur, [0.2, 0.4, 0.6, 1.0]);
        config.renderer.marker.radius = 1.5;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lk.ron");
        std::fs::write(&path, r#"(femur_path: "a.stl")"#).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.femur_path, "a.stl");
        assert_eq!(loaded.tibia_path, "models/Right_Tibia.stl");
        assert_eq!(loaded.renderer, RendererConfig::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lk.ron");
        std::fs::write(&path, "(femur_path: ").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(dir.path().join("absent.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
