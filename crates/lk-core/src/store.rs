//! Ordered, append-only landmark storage
//!
//! Indices are permanent once assigned: there is no removal and no
//! reordering. Axis definitions address landmarks by these indices.

use glam::Vec3;
use uuid::Uuid;

use crate::landmark::{Landmark, LandmarkName};

/// Ordered sequence of placed landmarks
#[derive(Debug, Clone, Default)]
pub struct LandmarkStore {
    landmarks: Vec<Landmark>,
}

impl LandmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a landmark and return its index
    pub fn append(&mut self, name: LandmarkName, position: Vec3) -> usize {
        self.landmarks.push(Landmark::new(name, position));
        self.landmarks.len() - 1
    }

    /// Move the landmark at `index`, leaving its name and id untouched
    pub fn update_position(&mut self, index: usize, position: Vec3) -> Result<(), StoreError> {
        let len = self.landmarks.len();
        let landmark = self
            .landmarks
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        landmark.position = position;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    /// Position at `index`, if placed
    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.landmarks.get(index).map(|l| l.position)
    }

    /// Current index of the landmark with the given id
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.landmarks.iter().position(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.landmarks
    }
}

/// Landmark store errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Landmark index {index} out of range (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_sequential_indices() {
        let mut store = LandmarkStore::new();
        assert_eq!(store.append(LandmarkName::FemurCenter, Vec3::ZERO), 0);
        assert_eq!(store.append(LandmarkName::HipCenter, Vec3::Y), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).map(|l| l.name), Some(LandmarkName::HipCenter));
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let mut store = LandmarkStore::new();
        store.append(LandmarkName::HipCenter, Vec3::ZERO);
        store.append(LandmarkName::HipCenter, Vec3::X);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_position_only_touches_target() {
        let mut store = LandmarkStore::new();
        store.append(LandmarkName::FemurCenter, Vec3::ZERO);
        store.append(LandmarkName::HipCenter, Vec3::Y);
        store.append(LandmarkName::FemurProximalCanal, Vec3::Z);
        let before = store.clone();

        store.update_position(1, Vec3::new(5.0, 6.0, 7.0)).unwrap();

        assert_eq!(store.len(), before.len());
        assert_eq!(store.get(0), before.get(0));
        assert_eq!(store.get(2), before.get(2));
        let moved = store.get(1).unwrap();
        let original = before.get(1).unwrap();
        assert_eq!(moved.position, Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(moved.name, original.name);
        assert_eq!(moved.id, original.id);
    }

    #[test]
    fn test_update_out_of_range() {
        let mut store = LandmarkStore::new();
        let err = store.update_position(3, Vec3::ZERO).unwrap_err();
        assert_eq!(err, StoreError::IndexOutOfRange { index: 3, len: 0 });
    }

    #[test]
    fn test_index_of_id() {
        let mut store = LandmarkStore::new();
        store.append(LandmarkName::FemurCenter, Vec3::ZERO);
        store.append(LandmarkName::HipCenter, Vec3::Y);
        let id = store.get(1).unwrap().id;
        assert_eq!(store.index_of(id), Some(1));
        assert_eq!(store.index_of(Uuid::new_v4()), None);
    }
}
