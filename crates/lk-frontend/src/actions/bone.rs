//! Bone mesh installation

use lk_core::{BoneKind, BoneMesh, Notice, StlError, load_stl_from_bytes};

use super::ActionContext;

/// Hand a loaded bone to the session and the viewport
pub fn install_bone(mut mesh: BoneMesh, ctx: &ActionContext) {
    let color = ctx.app_state.lock().config.bone_color(mesh.kind);
    mesh.color = color;

    tracing::info!(
        "Loaded {} '{}' ({} triangles)",
        mesh.kind.name(),
        mesh.name,
        mesh.triangle_count()
    );

    if let Some(viewport_state) = ctx.viewport_state {
        viewport_state.lock().set_bone(&mesh);
    }

    ctx.app_state.lock().session.set_bone(mesh);
}

/// Report a bone that failed to load
pub fn report_bone_error(kind: BoneKind, source: &str, error: &StlError, ctx: &ActionContext) {
    tracing::error!("Failed to load {} from {}: {}", kind.name(), source, error);
    ctx.app_state.lock().show_notice(Notice::error(format!(
        "Failed to load {} mesh from {}: {}",
        kind.name(),
        source,
        error
    )));
}

/// Replace a bone from STL bytes (browser file picker)
pub fn handle_bone_bytes(kind: BoneKind, name: &str, data: &[u8], ctx: &ActionContext) {
    match load_stl_from_bytes(name, data, kind) {
        Ok(mesh) => install_bone(mesh, ctx),
        Err(e) => report_bone_error(kind, name, &e, ctx),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::state::{AppState, SharedAppState, SharedViewportState};

    /// Binary STL holding one triangle
    fn triangle_stl() -> Vec<u8> {
        let mut data = vec![0u8; 80];
        data.extend_from_slice(&1u32.to_le_bytes());
        let floats: [f32; 12] = [
            0.0, 0.0, 1.0, // normal
            0.0, 0.0, 0.0, //
            10.0, 0.0, 0.0, //
            0.0, 10.0, 0.0,
        ];
        for f in floats {
            data.extend_from_slice(&f.to_le_bytes());
        }
        data.extend_from_slice(&0u16.to_le_bytes());
        data
    }

    #[test]
    fn test_bytes_install_bone_with_configured_color() {
        let app_state: SharedAppState = Arc::new(Mutex::new(AppState::default()));
        let viewport: Option<SharedViewportState> = None;
        let ctx = ActionContext::new(&app_state, &viewport);

        app_state.lock().config.femur_color = [0.1, 0.2, 0.3, 1.0];
        handle_bone_bytes(BoneKind::Femur, "femur.stl", &triangle_stl(), &ctx);

        let state = app_state.lock();
        let bone = state.session.scene().bone(BoneKind::Femur).unwrap();
        assert_eq!(bone.color, [0.1, 0.2, 0.3, 1.0]);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_bad_bytes_raise_error_notice() {
        let app_state: SharedAppState = Arc::new(Mutex::new(AppState::default()));
        let viewport: Option<SharedViewportState> = None;
        let ctx = ActionContext::new(&app_state, &viewport);

        handle_bone_bytes(BoneKind::Tibia, "tibia.stl", b"not an stl", &ctx);

        let state = app_state.lock();
        assert!(!state.session.scene().has_bone(BoneKind::Tibia));
        assert_eq!(
            state.notice.as_ref().map(|n| n.level),
            Some(lk_core::NoticeLevel::Error)
        );
    }
}
