//! Turning a pick ray into a new landmark

use glam::Vec3;

use crate::landmark::LandmarkName;
use crate::pick::{PickHit, PickScene};
use crate::ray::Ray;
use crate::store::LandmarkStore;

/// A landmark appended by a placement click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub name: LandmarkName,
    pub position: Vec3,
    pub hit: PickHit,
}

/// Append a landmark for `armed` at the nearest scene hit along `ray`.
///
/// Nothing armed, or nothing hit, leaves the store unchanged.
pub fn place_landmark(
    store: &mut LandmarkStore,
    armed: Option<LandmarkName>,
    ray: &Ray,
    scene: &PickScene,
) -> Option<Placement> {
    let name = armed?;
    let Some(hit) = scene.pick(ray) else {
        tracing::debug!("Placement click for {} hit nothing", name);
        return None;
    };

    let index = store.append(name, hit.point);
    tracing::info!(
        "Placed {} #{} at {:?} on {:?}",
        name,
        index,
        hit.point,
        hit.target
    );

    Some(Placement {
        index,
        name,
        position: hit.point,
        hit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pick::PickTarget;

    fn down_ray() -> Ray {
        Ray::new(Vec3::new(1.0, 2.0, 50.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_unarmed_click_is_noop() {
        let mut store = LandmarkStore::new();
        let scene = PickScene::new();

        assert!(place_landmark(&mut store, None, &down_ray(), &scene).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_armed_click_appends_at_hit() {
        let mut store = LandmarkStore::new();
        let scene = PickScene::new();

        let placement =
            place_landmark(&mut store, Some(LandmarkName::HipCenter), &down_ray(), &scene)
                .unwrap();

        assert_eq!(placement.index, 0);
        assert_eq!(placement.hit.target, PickTarget::PlacementPlane);
        assert_eq!(store.len(), 1);
        let landmark = store.get(0).unwrap();
        assert_eq!(landmark.name, LandmarkName::HipCenter);
        assert!((landmark.position - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_miss_is_silent() {
        let mut store = LandmarkStore::new();
        let mut scene = PickScene::new();
        scene.set_plane(None);

        let placed =
            place_landmark(&mut store, Some(LandmarkName::HipCenter), &down_ray(), &scene);
        assert!(placed.is_none());
        assert!(store.is_empty());
    }
}
