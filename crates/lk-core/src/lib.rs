//! Landmark Kit Core
//!
//! Data and interaction logic for annotating bone meshes:
//! - BoneMesh: STL surface placed in the scene
//! - LandmarkStore: ordered, index-addressed landmark positions
//! - InteractionController: armed name and drag capture
//! - Axis builder: anatomical lines from landmark pairs
//! - LandmarkSession: command reducer tying it all together

pub mod axis;
pub mod bone;
pub mod constants;
pub mod controller;
pub mod landmark;
pub mod pick;
pub mod placer;
pub mod ray;
pub mod session;
pub mod stl;
pub mod store;

pub use axis::*;
pub use bone::*;
pub use constants::*;
pub use controller::*;
pub use landmark::*;
pub use pick::*;
pub use placer::*;
pub use ray::*;
pub use session::*;
pub use stl::*;
pub use store::*;
