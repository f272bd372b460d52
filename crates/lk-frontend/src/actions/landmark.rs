//! Landmark action handlers
//!
//! Maps queued actions onto session commands and applies the resulting
//! events to the rest of the app.

use lk_core::{Command, Event, NoticeLevel};

use crate::state::{AppAction, AppState};

use super::ActionContext;

/// Handle landmark-related actions
pub fn handle_landmark_action(action: AppAction, ctx: &ActionContext) {
    let Some(command) = to_command(action) else {
        return;
    };

    let mut state = ctx.app_state.lock();
    if matches!(command, Command::ClickSurface { .. }) && state.loading {
        tracing::debug!("Ignoring placement while bones are loading");
        return;
    }

    let events = state.session.dispatch(command);
    apply_events(&mut state, &events);
}

/// Session command for a landmark action
fn to_command(action: AppAction) -> Option<Command> {
    let command = match action {
        AppAction::ArmLandmark(name) => Command::ArmLandmark(name),
        AppAction::PlaceAt(ray) => Command::ClickSurface { ray },
        AppAction::SelectLandmark(index) => Command::SelectLandmark(index),
        AppAction::MoveLandmark { index, position } => Command::DragLandmark { index, position },
        AppAction::EndDrag => Command::EndDrag,
        AppAction::Deselect => Command::Deselect,
        AppAction::UpdateLines => Command::RequestAxisBuild,
        _ => return None,
    };
    Some(command)
}

fn apply_events(state: &mut AppState, events: &[Event]) {
    for event in events {
        match event {
            Event::LandmarkPlaced {
                index,
                name,
                position,
            } => {
                tracing::debug!("Landmark #{} {} at {:?}", index, name, position);
            }
            Event::LinesRebuilt(count) => {
                tracing::info!("Axis lines rebuilt: {}", count);
            }
            Event::Notice(notice) => {
                match notice.level {
                    NoticeLevel::Info => tracing::info!("{}", notice.message),
                    NoticeLevel::Warning => tracing::warn!("{}", notice.message),
                    NoticeLevel::Error => tracing::error!("{}", notice.message),
                }
                state.show_notice(notice.clone());
            }
            Event::ArmedChanged(_)
            | Event::LandmarkMoved { .. }
            | Event::DragStarted(_)
            | Event::DragEnded(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec3;
    use lk_core::{LandmarkName, Ray};
    use parking_lot::Mutex;

    use super::*;
    use crate::state::{AppState, SharedAppState, SharedViewportState};

    fn shared() -> SharedAppState {
        Arc::new(Mutex::new(AppState::default()))
    }

    fn run(app_state: &SharedAppState, action: AppAction) {
        let viewport: Option<SharedViewportState> = None;
        let ctx = ActionContext::new(app_state, &viewport);
        handle_landmark_action(action, &ctx);
    }

    fn down_ray(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 50.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_update_with_one_landmark_shows_notice() {
        let app_state = shared();
        run(&app_state, AppAction::ArmLandmark(LandmarkName::FemurCenter));
        run(&app_state, AppAction::PlaceAt(down_ray(1.0, 2.0)));
        run(&app_state, AppAction::UpdateLines);

        let state = app_state.lock();
        assert_eq!(state.session.store().len(), 1);
        assert_eq!(
            state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Please create at least 2 landmarks to create lines!")
        );
    }

    #[test]
    fn test_two_landmarks_build_one_line() {
        let app_state = shared();
        run(&app_state, AppAction::ArmLandmark(LandmarkName::FemurCenter));
        run(&app_state, AppAction::PlaceAt(down_ray(0.0, 0.0)));
        run(&app_state, AppAction::ArmLandmark(LandmarkName::HipCenter));
        run(&app_state, AppAction::PlaceAt(down_ray(0.0, 20.0)));
        run(&app_state, AppAction::UpdateLines);

        let state = app_state.lock();
        assert_eq!(state.session.lines().len(), 1);
        assert_eq!(
            state.notice.as_ref().map(|n| n.message.as_str()),
            Some("1 lines created successfully!")
        );
    }

    #[test]
    fn test_placement_ignored_while_loading() {
        let app_state = shared();
        app_state.lock().loading = true;
        run(&app_state, AppAction::ArmLandmark(LandmarkName::FemurCenter));
        run(&app_state, AppAction::PlaceAt(down_ray(0.0, 0.0)));

        assert!(app_state.lock().session.store().is_empty());
    }

    #[test]
    fn test_select_then_move_then_release() {
        let app_state = shared();
        run(&app_state, AppAction::ArmLandmark(LandmarkName::MedialEpicondyle));
        run(&app_state, AppAction::PlaceAt(down_ray(3.0, 3.0)));
        run(&app_state, AppAction::SelectLandmark(0));
        assert!(!app_state.lock().session.orbit_enabled());

        run(
            &app_state,
            AppAction::MoveLandmark {
                index: 0,
                position: Vec3::new(4.0, 3.0, 0.0),
            },
        );
        run(&app_state, AppAction::EndDrag);

        let state = app_state.lock();
        assert!(state.session.orbit_enabled());
        assert_eq!(state.session.store().position(0), Some(Vec3::new(4.0, 3.0, 0.0)));
        assert_eq!(state.session.armed(), None);
    }
}
