//! Landmark interaction state machine
//!
//! Two orthogonal pieces of state:
//!
//! - the armed name waiting for the next placement click (`Idle` / `Armed`)
//! - the landmark captured for dragging (`NotDragging` / `Dragging`)
//!
//! Camera orbit is derived from the drag state and is never stored, so orbit
//! and drag cannot both be enabled.

use crate::landmark::LandmarkName;

/// Drag capture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    NotDragging,
    Dragging(usize),
}

/// Armed-name and drag-capture state
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    armed: Option<LandmarkName>,
    drag: DragState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name armed for the next placement click
    pub fn armed(&self) -> Option<LandmarkName> {
        self.armed
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Index of the landmark under drag
    pub fn dragging(&self) -> Option<usize> {
        match self.drag {
            DragState::Dragging(index) => Some(index),
            DragState::NotDragging => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging().is_some()
    }

    /// Camera orbit is available only while nothing is being dragged
    pub fn orbit_enabled(&self) -> bool {
        !self.is_dragging()
    }

    /// Arm `name`, or disarm it if it is already armed.
    ///
    /// Any drag capture is released. Returns the new armed name.
    pub fn toggle_armed(&mut self, name: LandmarkName) -> Option<LandmarkName> {
        self.armed = if self.armed == Some(name) {
            None
        } else {
            Some(name)
        };
        self.drag = DragState::NotDragging;
        self.armed
    }

    /// Capture a landmark for dragging. Clears the armed name.
    pub fn begin_drag(&mut self, index: usize) {
        self.armed = None;
        self.drag = DragState::Dragging(index);
    }

    /// Release the drag capture, returning the released index
    pub fn end_drag(&mut self) -> Option<usize> {
        let released = self.dragging();
        self.drag = DragState::NotDragging;
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_with_orbit() {
        let controller = InteractionController::new();
        assert_eq!(controller.armed(), None);
        assert_eq!(controller.drag_state(), DragState::NotDragging);
        assert!(controller.orbit_enabled());
    }

    #[test]
    fn test_double_toggle_returns_to_idle() {
        let mut controller = InteractionController::new();
        assert_eq!(
            controller.toggle_armed(LandmarkName::HipCenter),
            Some(LandmarkName::HipCenter)
        );
        assert_eq!(controller.toggle_armed(LandmarkName::HipCenter), None);
    }

    #[test]
    fn test_toggle_other_name_switches() {
        let mut controller = InteractionController::new();
        controller.toggle_armed(LandmarkName::HipCenter);
        assert_eq!(
            controller.toggle_armed(LandmarkName::MedialEpicondyle),
            Some(LandmarkName::MedialEpicondyle)
        );
    }

    #[test]
    fn test_drag_disarms_and_suspends_orbit() {
        let mut controller = InteractionController::new();
        controller.toggle_armed(LandmarkName::FemurCenter);
        controller.begin_drag(2);

        assert_eq!(controller.armed(), None);
        assert_eq!(controller.dragging(), Some(2));
        assert!(!controller.orbit_enabled());

        assert_eq!(controller.end_drag(), Some(2));
        assert!(controller.orbit_enabled());
        assert_eq!(controller.end_drag(), None);
    }

    #[test]
    fn test_arming_releases_drag() {
        let mut controller = InteractionController::new();
        controller.begin_drag(0);
        controller.toggle_armed(LandmarkName::HipCenter);
        assert!(!controller.is_dragging());
        assert!(controller.orbit_enabled());
    }
}
