//! Axis line construction from landmark pairs

use glam::Vec3;

use crate::constants::MIN_LANDMARKS_FOR_LINES;
use crate::store::LandmarkStore;

/// A named axis between two landmark store indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisDefinition {
    pub start_index: usize,
    pub end_index: usize,
    pub label: &'static str,
}

impl AxisDefinition {
    /// Both endpoints are placed in the store
    pub fn is_resolvable(&self, store: &LandmarkStore) -> bool {
        self.start_index < store.len() && self.end_index < store.len()
    }

    fn resolve(&self, store: &LandmarkStore) -> Option<(Vec3, Vec3)> {
        Some((store.position(self.start_index)?, store.position(self.end_index)?))
    }
}

/// Fixed axis table, addressed by placement order
pub const AXIS_DEFINITIONS: [AxisDefinition; 4] = [
    AxisDefinition {
        start_index: 0,
        end_index: 1,
        label: "Mechanical Axis",
    },
    AxisDefinition {
        start_index: 2,
        end_index: 3,
        label: "Anatomical Axis",
    },
    AxisDefinition {
        start_index: 4,
        end_index: 5,
        label: "TEA-Trans Epicondyle Axis",
    },
    AxisDefinition {
        start_index: 8,
        end_index: 9,
        label: "PCA-Posterior Condyle Axis",
    },
];

/// Renderable segment between two world points
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub label: &'static str,
    pub start: Vec3,
    pub end: Vec3,
}

impl LineSegment {
    /// Build a segment, rejecting non-finite endpoints
    pub fn new(label: &'static str, start: Vec3, end: Vec3) -> Result<Self, SegmentError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SegmentError::NonFinite { label, start, end });
        }
        Ok(Self { label, start, end })
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Result of a successful axis build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisBuild {
    /// Replacement line set
    pub lines: Vec<LineSegment>,
    /// Labels of axes whose endpoints are not placed yet
    pub skipped: Vec<&'static str>,
}

impl AxisBuild {
    /// User-facing success notice
    pub fn message(&self) -> String {
        format!("{} lines created successfully!", self.lines.len())
    }
}

/// Build line segments for every axis whose endpoints are both placed.
///
/// Axes with a missing endpoint are skipped with a debug log. A segment with a
/// non-finite endpoint is logged as an error and dropped.
pub fn build_axis_lines(store: &LandmarkStore) -> Result<AxisBuild, AxisBuildError> {
    if store.len() < MIN_LANDMARKS_FOR_LINES {
        return Err(AxisBuildError::InsufficientLandmarks { count: store.len() });
    }

    let mut build = AxisBuild::default();

    for axis in &AXIS_DEFINITIONS {
        let Some((start, end)) = axis.resolve(store) else {
            tracing::debug!("Skipping {}: Not enough landmarks.", axis.label);
            build.skipped.push(axis.label);
            continue;
        };

        match LineSegment::new(axis.label, start, end) {
            Ok(segment) => {
                tracing::info!("{} created.", axis.label);
                build.lines.push(segment);
            }
            Err(e) => {
                tracing::error!("{}", e);
            }
        }
    }

    if build.lines.is_empty() {
        return Err(AxisBuildError::NoLinesResolved);
    }

    Ok(build)
}

/// Axis build failures reported to the user
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AxisBuildError {
    #[error("Please create at least 2 landmarks to create lines!")]
    InsufficientLandmarks { count: usize },
    #[error("No lines could be created. Please add more landmarks.")]
    NoLinesResolved,
}

/// Malformed segment
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SegmentError {
    #[error("Invalid points for {label}: start={start}, end={end}")]
    NonFinite {
        label: &'static str,
        start: Vec3,
        end: Vec3,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::LandmarkName;

    fn store_with(count: usize) -> LandmarkStore {
        let mut store = LandmarkStore::new();
        for i in 0..count {
            let name = LandmarkName::ALL[i % LandmarkName::ALL.len()];
            store.append(name, Vec3::new(i as f32, 0.0, 0.0));
        }
        store
    }

    #[test]
    fn test_fewer_than_two_landmarks_is_insufficient() {
        for count in 0..2 {
            let err = build_axis_lines(&store_with(count)).unwrap_err();
            assert_eq!(err, AxisBuildError::InsufficientLandmarks { count });
            assert_eq!(
                err.to_string(),
                "Please create at least 2 landmarks to create lines!"
            );
        }
    }

    #[test]
    fn test_mechanical_axis_from_two_landmarks() {
        let mut store = LandmarkStore::new();
        store.append(LandmarkName::FemurCenter, Vec3::new(0.0, 0.0, 0.0));
        store.append(LandmarkName::HipCenter, Vec3::new(0.0, 1.0, 0.0));

        let build = build_axis_lines(&store).unwrap();

        assert_eq!(build.lines.len(), 1);
        assert_eq!(build.lines[0].label, "Mechanical Axis");
        assert_eq!(build.lines[0].start, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(build.lines[0].end, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(build.message(), "1 lines created successfully!");
    }

    #[test]
    fn test_six_landmarks_skip_posterior_condyle_axis() {
        let build = build_axis_lines(&store_with(6)).unwrap();

        let labels: Vec<_> = build.lines.iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec![
                "Mechanical Axis",
                "Anatomical Axis",
                "TEA-Trans Epicondyle Axis"
            ]
        );
        assert_eq!(build.skipped, vec!["PCA-Posterior Condyle Axis"]);
        assert_eq!(build.message(), "3 lines created successfully!");
    }

    #[test]
    fn test_full_store_builds_all_axes_with_exact_endpoints() {
        let store = store_with(10);
        let build = build_axis_lines(&store).unwrap();

        assert_eq!(build.lines.len(), AXIS_DEFINITIONS.len());
        for (line, axis) in build.lines.iter().zip(AXIS_DEFINITIONS.iter()) {
            assert_eq!(line.start, store.position(axis.start_index).unwrap());
            assert_eq!(line.end, store.position(axis.end_index).unwrap());
        }
    }

    #[test]
    fn test_non_finite_segment_is_dropped() {
        let mut store = store_with(4);
        store
            .update_position(3, Vec3::new(f32::NAN, 0.0, 0.0))
            .unwrap();

        let build = build_axis_lines(&store).unwrap();

        assert_eq!(build.lines.len(), 1);
        assert_eq!(build.lines[0].label, "Mechanical Axis");
    }

    #[test]
    fn test_only_malformed_segments_resolve_to_nothing() {
        let mut store = store_with(2);
        store
            .update_position(0, Vec3::new(f32::INFINITY, 0.0, 0.0))
            .unwrap();

        let err = build_axis_lines(&store).unwrap_err();
        assert_eq!(err, AxisBuildError::NoLinesResolved);
        assert_eq!(
            err.to_string(),
            "No lines could be created. Please add more landmarks."
        );
    }

    #[test]
    fn test_is_resolvable() {
        let store = store_with(5);
        assert!(AXIS_DEFINITIONS[0].is_resolvable(&store));
        assert!(AXIS_DEFINITIONS[1].is_resolvable(&store));
        assert!(!AXIS_DEFINITIONS[2].is_resolvable(&store));
        assert!(!AXIS_DEFINITIONS[3].is_resolvable(&store));
    }
}
