//! Application state module

mod viewport;

pub use viewport::{GizmoInteraction, SharedViewportState, ViewportState};

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;

use lk_core::{BoneKind, LandmarkName, LandmarkSession, Notice, Ray};

use crate::config::AppConfig;

/// Actions that can be performed on the app state
#[derive(Debug, Clone)]
pub enum AppAction {
    // Landmark actions
    /// Arm a landmark name for placement (toggles when already armed)
    ArmLandmark(LandmarkName),
    /// Place the armed landmark where the ray hits the scene
    PlaceAt(Ray),
    /// Capture a landmark for dragging
    SelectLandmark(usize),
    /// Move the captured landmark
    MoveLandmark { index: usize, position: Vec3 },
    /// Drag gesture released
    EndDrag,
    /// Clicked empty space
    Deselect,
    /// Rebuild the axis lines
    UpdateLines,

    // Bone actions
    /// Load both bones from the configured paths (native only)
    LoadBones,
    /// Replace a bone from a file (native only)
    ReplaceBone { kind: BoneKind, path: PathBuf },
    /// Replace a bone from STL bytes
    LoadBoneBytes {
        kind: BoneKind,
        name: String,
        data: Vec<u8>,
    },

    // Misc
    /// Close the notice window
    DismissNotice,
    /// Write the current configuration to disk (native only)
    SaveConfig,
}

/// Application state
pub struct AppState {
    /// Landmarks, drag state and axis lines
    pub session: LandmarkSession,
    /// Active configuration
    pub config: AppConfig,
    /// Notice shown in the modal window
    pub notice: Option<Notice>,
    /// Bone meshes are being loaded
    pub loading: bool,
    /// Landmark under the pointer
    pub hovered_landmark: Option<usize>,
    /// Draw landmark name labels next to markers
    pub show_labels: bool,
    /// Pending actions
    pending_actions: Vec<AppAction>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: LandmarkSession::new(),
            config,
            notice: None,
            loading: false,
            hovered_landmark: None,
            show_labels: true,
            pending_actions: Vec::new(),
        }
    }

    /// Queue an action
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Show a notice, replacing any visible one
    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Bones not yet in the scene
    pub fn missing_bones(&self) -> Vec<BoneKind> {
        BoneKind::ALL
            .iter()
            .copied()
            .filter(|kind| !self.session.scene().has_bone(*kind))
            .collect()
    }

    /// Both bones are loaded
    pub fn bones_ready(&self) -> bool {
        self.missing_bones().is_empty()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared app state
pub fn create_shared_state(config: AppConfig) -> SharedAppState {
    Arc::new(Mutex::new(AppState::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_are_drained_in_order() {
        let mut state = AppState::default();
        state.queue_action(AppAction::ArmLandmark(LandmarkName::HipCenter));
        state.queue_action(AppAction::UpdateLines);

        let actions = state.take_pending_actions();
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            actions[0],
            AppAction::ArmLandmark(LandmarkName::HipCenter)
        ));
        assert!(matches!(actions[1], AppAction::UpdateLines));
        assert!(state.take_pending_actions().is_empty());
    }

    #[test]
    fn test_bones_not_ready_initially() {
        let state = AppState::default();
        assert!(!state.bones_ready());
        assert_eq!(state.missing_bones(), vec![BoneKind::Femur, BoneKind::Tibia]);
        assert!(state.notice.is_none());
    }
}
