//! Landmark viewer frontend
//!
//! egui application for placing anatomical landmarks on femur and tibia
//! meshes and drawing the axes they define.

pub mod actions;
pub mod app;
pub mod config;
pub mod panels;
pub mod state;

pub use app::LandmarkApp;
pub use config::{AppConfig, ConfigError};
pub use state::{AppAction, AppState, SharedAppState};
