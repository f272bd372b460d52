//! Anatomical landmark definitions

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the ten fixed anatomical labels a landmark can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandmarkName {
    FemurCenter,
    HipCenter,
    FemurProximalCanal,
    FemurDistalCanal,
    MedialEpicondyle,
    LateralEpicondyle,
    DistalMedialPt,
    DistalLateralPt,
    PosteriorMedialPt,
    PosteriorLateralPt,
}

impl LandmarkName {
    /// Palette order
    pub const ALL: &'static [LandmarkName] = &[
        LandmarkName::FemurCenter,
        LandmarkName::HipCenter,
        LandmarkName::FemurProximalCanal,
        LandmarkName::FemurDistalCanal,
        LandmarkName::MedialEpicondyle,
        LandmarkName::LateralEpicondyle,
        LandmarkName::DistalMedialPt,
        LandmarkName::DistalLateralPt,
        LandmarkName::PosteriorMedialPt,
        LandmarkName::PosteriorLateralPt,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            LandmarkName::FemurCenter => "Femur Center",
            LandmarkName::HipCenter => "Hip Center",
            LandmarkName::FemurProximalCanal => "Femur Proximal Canal",
            LandmarkName::FemurDistalCanal => "Femur Distal Canal",
            LandmarkName::MedialEpicondyle => "Medial Epicondyle",
            LandmarkName::LateralEpicondyle => "Lateral Epicondyle",
            LandmarkName::DistalMedialPt => "Distal Medial Pt",
            LandmarkName::DistalLateralPt => "Distal Lateral Pt",
            LandmarkName::PosteriorMedialPt => "Posterior Medial Pt",
            LandmarkName::PosteriorLateralPt => "Posterior Lateral Pt",
        }
    }

    /// Look up a name by its label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|name| name.label() == label)
    }
}

impl std::fmt::Display for LandmarkName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named point placed on the bone surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Stable identifier assigned at creation
    pub id: Uuid,
    pub name: LandmarkName,
    /// World-space position
    pub position: Vec3,
}

impl Landmark {
    pub fn new(name: LandmarkName, position: Vec3) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_has_ten_labels() {
        assert_eq!(LandmarkName::ALL.len(), 10);
        assert_eq!(LandmarkName::ALL[0].label(), "Femur Center");
        assert_eq!(LandmarkName::ALL[9].label(), "Posterior Lateral Pt");
    }

    #[test]
    fn test_label_lookup() {
        for name in LandmarkName::ALL {
            assert_eq!(LandmarkName::from_label(name.label()), Some(*name));
        }
        assert_eq!(LandmarkName::from_label("Knee Center"), None);
    }

    #[test]
    fn test_new_landmarks_get_distinct_ids() {
        let a = Landmark::new(LandmarkName::HipCenter, Vec3::ZERO);
        let b = Landmark::new(LandmarkName::HipCenter, Vec3::ZERO);
        assert_ne!(a.id, b.id);
    }
}
