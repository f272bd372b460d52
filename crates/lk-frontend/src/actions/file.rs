//! File I/O action handlers (native)

use std::path::Path;

use lk_core::{BoneKind, Notice, load_stl};

use crate::config::AppConfig;
use crate::state::AppAction;

use super::ActionContext;
use super::bone::{install_bone, report_bone_error};

/// Handle file-related actions
pub fn handle_file_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::LoadBones => handle_load_bones(ctx),
        AppAction::ReplaceBone { kind, path } => handle_replace_bone(kind, &path, ctx),
        AppAction::SaveConfig => handle_save_config(ctx),
        _ => {}
    }
}

fn handle_load_bones(ctx: &ActionContext) {
    let paths: Vec<(BoneKind, String)> = {
        let mut state = ctx.app_state.lock();
        state.loading = true;
        BoneKind::ALL
            .iter()
            .map(|kind| (*kind, state.config.bone_path(*kind).to_string()))
            .collect()
    };

    for (kind, path) in paths {
        load_bone(kind, Path::new(&path), ctx);
    }

    ctx.app_state.lock().loading = false;
}

fn handle_replace_bone(kind: BoneKind, path: &Path, ctx: &ActionContext) {
    if load_bone(kind, path, ctx) {
        ctx.app_state
            .lock()
            .config
            .set_bone_path(kind, path.to_string_lossy());
    }
}

/// Load one bone; a failure leaves the other bone and the plane usable
fn load_bone(kind: BoneKind, path: &Path, ctx: &ActionContext) -> bool {
    match load_stl(path, kind) {
        Ok(mesh) => {
            install_bone(mesh, ctx);
            true
        }
        Err(e) => {
            report_bone_error(kind, &path.display().to_string(), &e, ctx);
            false
        }
    }
}

fn handle_save_config(ctx: &ActionContext) {
    let path = AppConfig::path();
    let result = ctx.app_state.lock().config.save(&path);
    match result {
        Ok(()) => {
            tracing::info!("Saved config to {}", path.display());
        }
        Err(e) => {
            tracing::error!("Failed to save config: {}", e);
            ctx.app_state
                .lock()
                .show_notice(Notice::error(format!("Failed to save config: {}", e)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::state::{AppState, SharedAppState, SharedViewportState};

    #[test]
    fn test_missing_bone_files_do_not_block_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.set_bone_path(BoneKind::Femur, dir.path().join("femur.stl").to_string_lossy());
        config.set_bone_path(BoneKind::Tibia, dir.path().join("tibia.stl").to_string_lossy());

        let app_state: SharedAppState = Arc::new(Mutex::new(AppState::new(config)));
        let viewport: Option<SharedViewportState> = None;
        let ctx = ActionContext::new(&app_state, &viewport);

        handle_file_action(AppAction::LoadBones, &ctx);

        let state = app_state.lock();
        assert!(!state.loading);
        assert!(!state.bones_ready());
        assert!(state.notice.is_some());
    }

    #[test]
    fn test_failed_replace_keeps_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let app_state: SharedAppState = Arc::new(Mutex::new(AppState::default()));
        let viewport: Option<SharedViewportState> = None;
        let ctx = ActionContext::new(&app_state, &viewport);

        handle_file_action(
            AppAction::ReplaceBone {
                kind: BoneKind::Tibia,
                path: dir.path().join("absent.stl"),
            },
            &ctx,
        );

        let state = app_state.lock();
        assert_eq!(state.config.tibia_path, "models/Right_Tibia.stl");
    }
}
