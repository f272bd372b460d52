//! Bone surface meshes placed in the scene

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    BONE_ROTATION_X, BONE_SCALE, BONE_TRANSLATION, DEFAULT_FEMUR_PATH, DEFAULT_TIBIA_PATH,
    FEMUR_COLOR, TIBIA_COLOR,
};
use crate::ray::{Aabb, Ray, ray_triangle_intersection};

/// Which bone a mesh represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoneKind {
    Femur,
    Tibia,
}

impl BoneKind {
    pub const ALL: &'static [BoneKind] = &[BoneKind::Femur, BoneKind::Tibia];

    pub fn name(&self) -> &'static str {
        match self {
            BoneKind::Femur => "Femur",
            BoneKind::Tibia => "Tibia",
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            BoneKind::Femur => DEFAULT_FEMUR_PATH,
            BoneKind::Tibia => DEFAULT_TIBIA_PATH,
        }
    }

    pub fn default_color(&self) -> [f32; 4] {
        match self {
            BoneKind::Femur => FEMUR_COLOR,
            BoneKind::Tibia => TIBIA_COLOR,
        }
    }
}

/// Scene placement shared by both bones: scale, then rotate about X, then translate
pub fn bone_placement() -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(BONE_SCALE),
        Quat::from_rotation_x(BONE_ROTATION_X),
        Vec3::from(BONE_TRANSLATION),
    )
}

/// Indexed triangle mesh of one bone
#[derive(Debug, Clone)]
pub struct BoneMesh {
    pub id: Uuid,
    pub kind: BoneKind,
    pub name: String,
    /// Source path, if loaded from disk
    pub source: Option<String>,
    pub vertices: Vec<[f32; 3]>,
    /// One normal per triangle
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    /// Local to world transform
    pub transform: Mat4,
    pub color: [f32; 4],
    pub bbox_min: [f32; 3],
    pub bbox_max: [f32; 3],
}

impl BoneMesh {
    pub fn new(kind: BoneKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            source: None,
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            transform: bone_placement(),
            color: kind.default_color(),
            bbox_min: [0.0; 3],
            bbox_max: [0.0; 3],
        }
    }

    /// Recompute the local bounding box from the vertices
    pub fn calculate_bounding_box(&mut self) {
        let bbox = self.local_bounds();
        if bbox.is_empty() {
            self.bbox_min = [0.0; 3];
            self.bbox_max = [0.0; 3];
        } else {
            self.bbox_min = bbox.min.to_array();
            self.bbox_max = bbox.max.to_array();
        }
    }

    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| Vec3::from(*v)))
    }

    pub fn world_bounds(&self) -> Aabb {
        Aabb::new(Vec3::from(self.bbox_min), Vec3::from(self.bbox_max)).transform(&self.transform)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn triangle(&self, i: usize) -> Option<[Vec3; 3]> {
        let tri = self.indices.get(i * 3..i * 3 + 3)?;
        let v = |idx: u32| self.vertices.get(idx as usize).map(|p| Vec3::from(*p));
        Some([v(tri[0])?, v(tri[1])?, v(tri[2])?])
    }

    /// Nearest world-space ray parameter hitting this mesh
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        self.world_bounds().ray_intersection(ray)?;

        let local = ray.to_local(&self.transform);
        (0..self.triangle_count())
            .filter_map(|i| {
                let [v0, v1, v2] = self.triangle(i)?;
                ray_triangle_intersection(&local, v0, v1, v2)
            })
            .min_by(|a, b| a.total_cmp(b))
    }
}
