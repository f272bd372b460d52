//! Overlay update logic

use crate::state::{SharedAppState, SharedViewportState};

/// Push landmarks, axis lines and the gizmo attachment to the renderer
pub fn update_overlays(app_state: &SharedAppState, viewport_state: &Option<SharedViewportState>) {
    let Some(viewport_state) = viewport_state else {
        return;
    };

    let state = app_state.lock();
    let session = &state.session;
    let dragging = session.dragging();
    let gizmo_target =
        dragging.and_then(|index| session.store().position(index).map(|p| (index, p)));

    let mut vp = viewport_state.lock();
    vp.update_landmarks(
        session.store().as_slice(),
        state.hovered_landmark,
        dragging,
    );
    vp.update_lines(session.lines());
    vp.attach_gizmo(gizmo_target);
}
