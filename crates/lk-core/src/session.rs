//! Single-owner landmark session
//!
//! All landmark, selection and line state lives here and changes only through
//! [`LandmarkSession::dispatch`]. Callers read the results back through the
//! accessors and the returned [`Event`]s.

use glam::Vec3;

use crate::axis::{LineSegment, build_axis_lines};
use crate::bone::BoneMesh;
use crate::controller::InteractionController;
use crate::landmark::LandmarkName;
use crate::pick::PickScene;
use crate::placer::place_landmark;
use crate::ray::Ray;
use crate::store::LandmarkStore;

/// Commands accepted by the session
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Arm a name for the next placement, or disarm it if already armed
    ArmLandmark(LandmarkName),
    /// Placement click: pick the scene and place the armed name
    ClickSurface { ray: Ray },
    /// Append a landmark at a known position
    PlaceLandmark { name: LandmarkName, position: Vec3 },
    /// Capture a landmark for dragging
    SelectLandmark(usize),
    /// Move the captured landmark
    DragLandmark { index: usize, position: Vec3 },
    /// Drag gesture released
    EndDrag,
    /// Click on empty space while a landmark is captured
    Deselect,
    /// Rebuild axis lines from the current landmarks
    RequestAxisBuild,
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// State changes produced by a command
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ArmedChanged(Option<LandmarkName>),
    LandmarkPlaced {
        index: usize,
        name: LandmarkName,
        position: Vec3,
    },
    LandmarkMoved {
        index: usize,
        position: Vec3,
    },
    DragStarted(usize),
    DragEnded(usize),
    /// Line set replaced; carries the new line count
    LinesRebuilt(usize),
    Notice(Notice),
}

/// Landmarks, interaction state, lines and pick geometry for one session
#[derive(Debug, Clone, Default)]
pub struct LandmarkSession {
    store: LandmarkStore,
    controller: InteractionController,
    lines: Vec<LineSegment>,
    scene: PickScene,
}

impl LandmarkSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &LandmarkStore {
        &self.store
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn lines(&self) -> &[LineSegment] {
        &self.lines
    }

    pub fn scene(&self) -> &PickScene {
        &self.scene
    }

    /// Add or replace a bone in the pick scene
    pub fn set_bone(&mut self, mesh: BoneMesh) {
        tracing::debug!("Pick scene bone set: {} ({})", mesh.kind.name(), mesh.name);
        self.scene.set_bone(mesh);
    }

    pub fn armed(&self) -> Option<LandmarkName> {
        self.controller.armed()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.controller.dragging()
    }

    pub fn orbit_enabled(&self) -> bool {
        self.controller.orbit_enabled()
    }

    /// Apply a command and report what changed
    pub fn dispatch(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();

        match command {
            Command::ArmLandmark(name) => {
                if let Some(index) = self.controller.dragging() {
                    events.push(Event::DragEnded(index));
                }
                let armed = self.controller.toggle_armed(name);
                tracing::debug!("Armed landmark: {:?}", armed);
                events.push(Event::ArmedChanged(armed));
            }
            Command::ClickSurface { ray } => {
                if let Some(placement) =
                    place_landmark(&mut self.store, self.controller.armed(), &ray, &self.scene)
                {
                    events.push(Event::LandmarkPlaced {
                        index: placement.index,
                        name: placement.name,
                        position: placement.position,
                    });
                }
            }
            Command::PlaceLandmark { name, position } => {
                let index = self.store.append(name, position);
                tracing::info!("Placed {} #{} at {:?}", name, index, position);
                events.push(Event::LandmarkPlaced {
                    index,
                    name,
                    position,
                });
            }
            Command::SelectLandmark(index) => {
                if index >= self.store.len() {
                    tracing::warn!("Ignoring selection of unknown landmark #{}", index);
                    return events;
                }
                let was_armed = self.controller.armed().is_some();
                match self.controller.dragging() {
                    Some(previous) if previous != index => {
                        events.push(Event::DragEnded(previous));
                    }
                    _ => {}
                }
                self.controller.begin_drag(index);
                if was_armed {
                    events.push(Event::ArmedChanged(None));
                }
                events.push(Event::DragStarted(index));
            }
            Command::DragLandmark { index, position } => {
                if self.controller.dragging() != Some(index) {
                    tracing::warn!("Ignoring drag of landmark #{} that is not captured", index);
                    return events;
                }
                match self.store.update_position(index, position) {
                    Ok(()) => events.push(Event::LandmarkMoved { index, position }),
                    Err(e) => tracing::warn!("Drag update failed: {}", e),
                }
            }
            Command::EndDrag | Command::Deselect => {
                if let Some(index) = self.controller.end_drag() {
                    events.push(Event::DragEnded(index));
                }
            }
            Command::RequestAxisBuild => match build_axis_lines(&self.store) {
                Ok(build) => {
                    let notice = Notice::info(build.message());
                    self.lines = build.lines;
                    events.push(Event::LinesRebuilt(self.lines.len()));
                    events.push(Event::Notice(notice));
                }
                Err(e) => {
                    tracing::info!("Axis build: {}", e);
                    events.push(Event::Notice(Notice::warning(e.to_string())));
                }
            },
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notices(events: &[Event]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Notice(n) => Some(n.message.clone()),
                _ => None,
            })
            .collect()
    }

    fn click_at(x: f32, y: f32) -> Command {
        Command::ClickSurface {
            ray: Ray::new(Vec3::new(x, y, 100.0), Vec3::NEG_Z),
        }
    }

    #[test]
    fn test_click_without_armed_name_changes_nothing() {
        let mut session = LandmarkSession::new();
        let events = session.dispatch(click_at(0.0, 0.0));
        assert!(events.is_empty());
        assert_eq!(session.store().len(), 0);
    }

    #[test]
    fn test_armed_click_places_and_stays_armed() {
        let mut session = LandmarkSession::new();
        session.dispatch(Command::ArmLandmark(LandmarkName::FemurCenter));
        let events = session.dispatch(click_at(3.0, 4.0));

        assert!(matches!(
            events.as_slice(),
            [Event::LandmarkPlaced {
                index: 0,
                name: LandmarkName::FemurCenter,
                ..
            }]
        ));
        assert_eq!(session.armed(), Some(LandmarkName::FemurCenter));

        session.dispatch(click_at(5.0, 6.0));
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn test_empty_store_reports_insufficient() {
        let mut session = LandmarkSession::new();
        let events = session.dispatch(Command::RequestAxisBuild);

        assert_eq!(
            notices(&events),
            vec!["Please create at least 2 landmarks to create lines!"]
        );
        assert!(session.lines().is_empty());
    }

    #[test]
    fn test_two_landmarks_build_mechanical_axis() {
        let mut session = LandmarkSession::new();
        session.dispatch(Command::PlaceLandmark {
            name: LandmarkName::FemurCenter,
            position: Vec3::new(0.0, 0.0, 0.0),
        });
        session.dispatch(Command::PlaceLandmark {
            name: LandmarkName::HipCenter,
            position: Vec3::new(0.0, 1.0, 0.0),
        });

        let events = session.dispatch(Command::RequestAxisBuild);

        assert!(events.contains(&Event::LinesRebuilt(1)));
        assert_eq!(notices(&events), vec!["1 lines created successfully!"]);
        let line = &session.lines()[0];
        assert_eq!(line.label, "Mechanical Axis");
        assert_eq!(line.start, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(line.end, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_rebuild_replaces_lines() {
        let mut session = LandmarkSession::new();
        for (i, name) in LandmarkName::ALL.iter().take(6).enumerate() {
            session.dispatch(Command::PlaceLandmark {
                name: *name,
                position: Vec3::splat(i as f32),
            });
        }
        session.dispatch(Command::RequestAxisBuild);
        assert_eq!(session.lines().len(), 3);

        session.dispatch(Command::SelectLandmark(0));
        session.dispatch(Command::DragLandmark {
            index: 0,
            position: Vec3::new(9.0, 9.0, 9.0),
        });
        session.dispatch(Command::RequestAxisBuild);

        assert_eq!(session.lines().len(), 3);
        assert_eq!(session.lines()[0].start, Vec3::new(9.0, 9.0, 9.0));
    }

    #[test]
    fn test_insufficient_build_emits_no_lines_event() {
        let mut session = LandmarkSession::new();
        session.dispatch(Command::PlaceLandmark {
            name: LandmarkName::FemurCenter,
            position: Vec3::ZERO,
        });
        let events = session.dispatch(Command::RequestAxisBuild);
        assert!(!events.iter().any(|e| matches!(e, Event::LinesRebuilt(_))));
        assert!(session.lines().is_empty());
    }

    #[test]
    fn test_select_disarms_and_suspends_orbit() {
        let mut session = LandmarkSession::new();
        session.dispatch(Command::PlaceLandmark {
            name: LandmarkName::FemurCenter,
            position: Vec3::ZERO,
        });
        session.dispatch(Command::ArmLandmark(LandmarkName::HipCenter));

        let events = session.dispatch(Command::SelectLandmark(0));

        assert_eq!(
            events,
            vec![Event::ArmedChanged(None), Event::DragStarted(0)]
        );
        assert!(!session.orbit_enabled());

        let events = session.dispatch(Command::EndDrag);
        assert_eq!(events, vec![Event::DragEnded(0)]);
        assert!(session.orbit_enabled());
    }

    #[test]
    fn test_drag_mutates_only_captured_position() {
        let mut session = LandmarkSession::new();
        for name in &LandmarkName::ALL[..3] {
            session.dispatch(Command::PlaceLandmark {
                name: *name,
                position: Vec3::ZERO,
            });
        }
        let before = session.store().clone();

        // Not captured yet
        assert!(
            session
                .dispatch(Command::DragLandmark {
                    index: 1,
                    position: Vec3::X,
                })
                .is_empty()
        );

        session.dispatch(Command::SelectLandmark(1));
        session.dispatch(Command::DragLandmark {
            index: 1,
            position: Vec3::X,
        });

        let after = session.store();
        assert_eq!(after.len(), before.len());
        assert_eq!(after.get(0), before.get(0));
        assert_eq!(after.get(2), before.get(2));
        assert_eq!(after.get(1).unwrap().name, before.get(1).unwrap().name);
        assert_eq!(after.get(1).unwrap().position, Vec3::X);
    }

    #[test]
    fn test_select_unknown_index_is_ignored() {
        let mut session = LandmarkSession::new();
        assert!(session.dispatch(Command::SelectLandmark(4)).is_empty());
        assert!(session.orbit_enabled());
    }

    #[test]
    fn test_arming_ends_drag() {
        let mut session = LandmarkSession::new();
        session.dispatch(Command::PlaceLandmark {
            name: LandmarkName::FemurCenter,
            position: Vec3::ZERO,
        });
        session.dispatch(Command::SelectLandmark(0));

        let events = session.dispatch(Command::ArmLandmark(LandmarkName::HipCenter));

        assert_eq!(
            events,
            vec![
                Event::DragEnded(0),
                Event::ArmedChanged(Some(LandmarkName::HipCenter))
            ]
        );
        assert!(session.orbit_enabled());
    }
}
