//! Global constants for lk-core

/// STL vertex comparison precision (multiply by this, then round to int)
pub const STL_VERTEX_PRECISION: f32 = 10000.0;

/// Uniform scale applied to both bone meshes when placed in the scene
pub const BONE_SCALE: f32 = 0.1;

/// Rotation about X (radians) applied to both bone meshes
pub const BONE_ROTATION_X: f32 = -std::f32::consts::FRAC_PI_2;

/// Translation applied to both bone meshes after scale and rotation
pub const BONE_TRANSLATION: [f32; 3] = [10.0, -70.0, 0.0];

/// Default femur asset path
pub const DEFAULT_FEMUR_PATH: &str = "models/Right_Femur.stl";

/// Default tibia asset path
pub const DEFAULT_TIBIA_PATH: &str = "models/Right_Tibia.stl";

/// Femur color (light green, RGBA)
pub const FEMUR_COLOR: [f32; 4] = [0.565, 0.933, 0.565, 1.0];

/// Tibia color (light pink, RGBA)
pub const TIBIA_COLOR: [f32; 4] = [1.0, 0.714, 0.757, 1.0];

/// Edge length of the invisible placement plane
pub const PLACEMENT_PLANE_SIZE: f32 = 100.0;

/// Minimum ray parameter accepted as a hit
pub const RAY_EPSILON: f32 = 1e-7;

/// Minimum number of landmarks before axis construction is attempted
pub const MIN_LANDMARKS_FOR_LINES: usize = 2;
