//! Action handling module
//!
//! Actions are queued in AppState and processed at the start of each frame.

mod bone;
#[cfg(not(target_arch = "wasm32"))]
mod file;
mod landmark;

use crate::state::{AppAction, SharedAppState, SharedViewportState};

pub use bone::{handle_bone_bytes, install_bone};
#[cfg(not(target_arch = "wasm32"))]
pub use file::handle_file_action;
pub use landmark::handle_landmark_action;

/// Context for action handlers
pub struct ActionContext<'a> {
    pub app_state: &'a SharedAppState,
    pub viewport_state: &'a Option<SharedViewportState>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        app_state: &'a SharedAppState,
        viewport_state: &'a Option<SharedViewportState>,
    ) -> Self {
        Self {
            app_state,
            viewport_state,
        }
    }
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::ArmLandmark(_)
        | AppAction::PlaceAt(_)
        | AppAction::SelectLandmark(_)
        | AppAction::MoveLandmark { .. }
        | AppAction::EndDrag
        | AppAction::Deselect
        | AppAction::UpdateLines => {
            handle_landmark_action(action, ctx);
        }

        // File actions (native only)
        #[cfg(not(target_arch = "wasm32"))]
        AppAction::LoadBones | AppAction::ReplaceBone { .. } | AppAction::SaveConfig => {
            handle_file_action(action, ctx);
        }

        // File actions (WASM - ignore)
        #[cfg(target_arch = "wasm32")]
        AppAction::LoadBones | AppAction::ReplaceBone { .. } | AppAction::SaveConfig => {
            tracing::warn!("Path-based file actions are not supported in WASM");
        }

        AppAction::LoadBoneBytes { kind, name, data } => {
            handle_bone_bytes(kind, &name, &data, ctx);
        }

        AppAction::DismissNotice => {
            ctx.app_state.lock().notice = None;
        }
    }
}
