//! Built-in sub-renderers
//!
//! - [`mesh::MeshRenderer`]: lit bone surfaces
//! - [`line::LineRenderer`]: anatomical axis lines
//! - [`marker::MarkerRenderer`]: landmark spheres
//! - [`gizmo::GizmoRenderer`]: translate handles for dragging a landmark

pub mod gizmo;
pub mod line;
pub mod marker;
pub mod mesh;

pub use gizmo::{GizmoAxis, GizmoRenderer};
pub use line::{LineInstance, LineRenderer};
pub use marker::{MarkerInstance, MarkerRenderer};
pub use mesh::{MeshData, MeshInstance, MeshRenderer};
