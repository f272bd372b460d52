//! Pickable scene geometry for landmark placement

use glam::{Quat, Vec3};

use crate::bone::{BoneKind, BoneMesh};
use crate::constants::PLACEMENT_PLANE_SIZE;
use crate::ray::{Aabb, Ray, ray_plane_intersection, ray_sphere_intersection};
use crate::store::LandmarkStore;

/// Invisible square that catches clicks beside the bones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPlane {
    pub center: Vec3,
    pub normal: Vec3,
    /// Edge length
    pub size: f32,
}

impl Default for PlacementPlane {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            normal: Vec3::Z,
            size: PLACEMENT_PLANE_SIZE,
        }
    }
}

impl PlacementPlane {
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let normal = self.normal.normalize_or_zero();
        let t = ray_plane_intersection(ray, self.center, normal)?;
        let to_local = Quat::from_rotation_arc(normal, Vec3::Z);
        let local = to_local * (ray.at(t) - self.center);
        let half = self.size * 0.5;
        (local.x.abs() <= half && local.y.abs() <= half).then_some(t)
    }
}

/// What a pick ray landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Bone(BoneKind),
    PlacementPlane,
}

/// Nearest intersection along a pick ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub target: PickTarget,
    pub point: Vec3,
    pub distance: f32,
}

/// All geometry a placement click is tested against
#[derive(Debug, Clone)]
pub struct PickScene {
    bones: Vec<BoneMesh>,
    plane: Option<PlacementPlane>,
}

impl Default for PickScene {
    fn default() -> Self {
        Self {
            bones: Vec::new(),
            plane: Some(PlacementPlane::default()),
        }
    }
}

impl PickScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bone, replacing any bone of the same kind
    pub fn set_bone(&mut self, mesh: BoneMesh) -> Option<BoneMesh> {
        match self.bones.iter_mut().find(|b| b.kind == mesh.kind) {
            Some(slot) => Some(std::mem::replace(slot, mesh)),
            None => {
                self.bones.push(mesh);
                None
            }
        }
    }

    pub fn bone(&self, kind: BoneKind) -> Option<&BoneMesh> {
        self.bones.iter().find(|b| b.kind == kind)
    }

    pub fn bones(&self) -> &[BoneMesh] {
        &self.bones
    }

    pub fn has_bone(&self, kind: BoneKind) -> bool {
        self.bone(kind).is_some()
    }

    pub fn plane(&self) -> Option<&PlacementPlane> {
        self.plane.as_ref()
    }

    pub fn set_plane(&mut self, plane: Option<PlacementPlane>) {
        self.plane = plane;
    }

    /// World bounds of all loaded bones
    pub fn bone_bounds(&self) -> Aabb {
        self.bones
            .iter()
            .fold(Aabb::empty(), |acc, b| acc.union(&b.world_bounds()))
    }

    /// Nearest hit across bones and the placement plane
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        let bone_hits = self.bones.iter().filter_map(|bone| {
            bone.ray_intersection(ray).map(|t| (PickTarget::Bone(bone.kind), t))
        });
        let plane_hit = self
            .plane
            .as_ref()
            .and_then(|p| p.ray_intersection(ray))
            .map(|t| (PickTarget::PlacementPlane, t));

        bone_hits
            .chain(plane_hit)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(target, t)| PickHit {
                target,
                point: ray.at(t),
                distance: t,
            })
    }
}

/// Index of the landmark marker nearest along `ray`, treating each marker
/// as a sphere of `radius`
pub fn pick_landmark(store: &LandmarkStore, ray: &Ray, radius: f32) -> Option<usize> {
    store
        .iter()
        .enumerate()
        .filter_map(|(index, landmark)| {
            ray_sphere_intersection(ray, landmark.position, radius).map(|t| (index, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bone::tests::square_mesh;
    use crate::landmark::LandmarkName;
    use glam::Mat4;

    fn down_ray(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 50.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_plane_catches_clicks_within_extent() {
        let scene = PickScene::new();
        let hit = scene.pick(&down_ray(10.0, -20.0)).unwrap();
        assert_eq!(hit.target, PickTarget::PlacementPlane);
        assert!((hit.point - Vec3::new(10.0, -20.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_plane_is_finite() {
        let scene = PickScene::new();
        assert!(scene.pick(&down_ray(51.0, 0.0)).is_none());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut scene = PickScene::new();
        scene.set_bone(square_mesh(
            BoneKind::Femur,
            Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)),
        ));
        scene.set_bone(square_mesh(
            BoneKind::Tibia,
            Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)),
        ));

        let hit = scene.pick(&down_ray(0.5, 0.5)).unwrap();
        assert_eq!(hit.target, PickTarget::Bone(BoneKind::Tibia));
        assert!((hit.point.z - 10.0).abs() < 1e-4);

        // Outside both bones, only the plane remains
        let hit = scene.pick(&down_ray(3.0, 3.0)).unwrap();
        assert_eq!(hit.target, PickTarget::PlacementPlane);
    }

    #[test]
    fn test_set_bone_replaces_same_kind() {
        let mut scene = PickScene::new();
        assert!(scene.set_bone(square_mesh(BoneKind::Femur, Mat4::IDENTITY)).is_none());
        assert!(scene.set_bone(square_mesh(BoneKind::Femur, Mat4::IDENTITY)).is_some());
        assert_eq!(scene.bones().len(), 1);
    }

    #[test]
    fn test_no_geometry_no_hit() {
        let mut scene = PickScene::new();
        scene.set_plane(None);
        assert!(scene.pick(&down_ray(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_pick_landmark_prefers_nearest_marker() {
        let mut store = LandmarkStore::new();
        store.append(LandmarkName::FemurCenter, Vec3::new(0.0, 0.0, 0.0));
        store.append(LandmarkName::HipCenter, Vec3::new(0.0, 0.0, 10.0));
        store.append(LandmarkName::MedialEpicondyle, Vec3::new(5.0, 0.0, 20.0));

        assert_eq!(pick_landmark(&store, &down_ray(0.0, 0.0), 0.5), Some(1));
        assert_eq!(pick_landmark(&store, &down_ray(5.2, 0.0), 0.5), Some(2));
        assert_eq!(pick_landmark(&store, &down_ray(2.0, 0.0), 0.5), None);
    }
}
