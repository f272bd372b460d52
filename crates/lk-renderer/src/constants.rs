//! Rendering constants
//!
//! Geometry resolution, buffer capacities and camera limits shared across
//! the sub-renderers.

/// Gizmo geometry constants
pub mod gizmo {
    /// Arrow shaft radius
    pub const SHAFT_RADIUS: f32 = 0.02;
    /// Arrow head radius
    pub const HEAD_RADIUS: f32 = 0.06;
    /// Arrow head length
    pub const HEAD_LENGTH: f32 = 0.15;
    /// Total arrow length
    pub const ARROW_LENGTH: f32 = 1.0;
    /// Number of segments for cylindrical geometry
    pub const SEGMENTS: u32 = 8;
    /// Hit test cylinder radius multiplier
    pub const HIT_RADIUS_MULTIPLIER: f32 = 0.08;
    /// On-screen size relative to camera distance; the shader uses the same factor
    pub const DISTANCE_SCALE: f32 = 0.15;
}

/// Marker (sphere) geometry constants
pub mod marker {
    /// Number of horizontal segments for sphere
    pub const SEGMENTS: u32 = 16;
    /// Number of vertical rings for sphere
    pub const RINGS: u32 = 12;
}

/// Instance buffer limits
pub mod instances {
    /// Maximum number of landmark markers
    pub const MAX_MARKERS: u32 = 256;
    /// Maximum number of axis lines
    pub const MAX_LINES: u32 = 64;
}

/// Camera limits
pub mod camera {
    /// Minimum pitch angle in degrees
    pub const MIN_PITCH_DEGREES: f32 = -89.0;
    /// Maximum pitch angle in degrees
    pub const MAX_PITCH_DEGREES: f32 = 89.0;
    /// Minimum orbit distance
    pub const MIN_DISTANCE: f32 = 0.1;
    /// Maximum orbit distance
    pub const MAX_DISTANCE: f32 = 10000.0;
    /// Fit-all radius multiplier
    pub const FIT_ALL_MULTIPLIER: f32 = 2.5;
}

/// Viewport rendering constants
pub mod viewport {
    /// Depth buffer format used by every pipeline
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
}
