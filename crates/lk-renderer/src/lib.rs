//! Landmark Kit Renderer
//!
//! WGPU-based 3D rendering for the bone landmark viewer.
//!
//! # Module Structure
//!
//! ```text
//! lk-renderer/
//! ├── sub_renderers/   # Bone mesh, landmark marker, axis line, gizmo
//! ├── camera.rs        # Orbit camera
//! ├── config.rs        # Serializable renderer settings
//! ├── light.rs         # Directional + ambient light uniform
//! ├── pipeline.rs      # Pipeline builder, render targets
//! └── renderer.rs      # Main Renderer
//! ```

pub mod camera;
pub mod config;
pub mod constants;
pub mod instanced;
pub mod light;
pub mod pipeline;
pub mod renderer;
pub mod sub_renderers;
pub mod vertex;

pub use camera::*;
pub use config::RendererConfig;
pub use light::{DirectionalLight, LightUniform};
pub use renderer::*;
pub use sub_renderers::{
    GizmoAxis, GizmoRenderer, LineInstance, LineRenderer, MarkerInstance, MarkerRenderer,
    MeshData, MeshRenderer,
};
pub use vertex::{MeshVertex, PositionVertex};
