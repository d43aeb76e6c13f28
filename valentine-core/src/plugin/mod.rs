//! Bevy integration
//!
//! The page layer writes live measurements into [`LayoutGeometry`] and sends
//! [`DeclineAttemptEvent`] / [`AcceptActivateEvent`]; the plugin applies them
//! to the [`ProposalSession`] resource and reports back through output
//! events the renderer consumes.

use bevy::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::ProposalConfig;
use crate::geometry::{Bounds, GeometryProvider, Point, StaticGeometry};
use crate::placement::Placement;
use crate::random::RandSource;
use crate::session::{AcceptTarget, DeclineOutcome, ProposalSession};
use crate::spawn::SpawnedAcceptTarget;
use crate::stage::DeclineAppearance;

pub struct ProposalPlugin {
    pub config: ProposalConfig,
    pub seed: u64,
}

impl Default for ProposalPlugin {
    fn default() -> Self {
        Self {
            config: ProposalConfig::default(),
            seed: 42,
        }
    }
}

impl Plugin for ProposalPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ProposalSession::new(self.config.clone()))
            .insert_resource(SessionRng(RandSource::seeded(self.seed)))
            .init_resource::<LayoutGeometry>()
            .init_resource::<Time>()
            .add_event::<DeclineAttemptEvent>()
            .add_event::<AcceptActivateEvent>()
            .add_event::<DeclineMovedEvent>()
            .add_event::<DeclineHiddenEvent>()
            .add_event::<AcceptTargetsSpawnedEvent>()
            .add_event::<ProposalAcceptedEvent>()
            .add_event::<CelebrationEndedEvent>()
            .add_systems(Startup, initial_placement)
            .add_systems(
                Update,
                (
                    handle_decline_attempts,
                    handle_accept_activations,
                    tick_celebration,
                )
                    .chain(),
            );
    }
}

/// Live layout measurements, written by the page on mount and resize
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LayoutGeometry(pub StaticGeometry);

impl GeometryProvider for LayoutGeometry {
    fn container_bounds(&self) -> Bounds {
        self.0.container
    }

    fn accept_bounds(&self) -> Bounds {
        self.0.accept
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SessionRng(pub RandSource<Xoshiro256PlusPlus>);

/// Input: pointer entered or activated the decline target
#[derive(Event, Debug, Clone, Copy)]
pub struct DeclineAttemptEvent;

/// Input: an accept target was activated
#[derive(Event, Debug, Clone, Copy)]
pub struct AcceptActivateEvent {
    pub target: AcceptTarget,
}

/// Output: decline target has a new position
#[derive(Event, Debug, Clone)]
pub struct DeclineMovedEvent {
    pub attempts: u32,
    pub stage: u32,
    pub placement: Placement,
    pub appearance: DeclineAppearance,
}

/// Output: decline target is past its last visible level
#[derive(Event, Debug, Clone, Copy)]
pub struct DeclineHiddenEvent {
    pub attempts: u32,
    pub last_position: Point,
}

/// Output: extra accept targets appeared
#[derive(Event, Debug, Clone)]
pub struct AcceptTargetsSpawnedEvent {
    pub created: Vec<SpawnedAcceptTarget>,
    pub retained: usize,
}

/// Output: session moved to Success
#[derive(Event, Debug, Clone, Copy)]
pub struct ProposalAcceptedEvent {
    pub attempts: u32,
    pub target: AcceptTarget,
}

/// Output: celebration effect should stop
#[derive(Event, Debug, Clone, Copy)]
pub struct CelebrationEndedEvent;

fn initial_placement(
    mut session: ResMut<ProposalSession>,
    geometry: Res<LayoutGeometry>,
    mut rng: ResMut<SessionRng>,
    mut moved: EventWriter<DeclineMovedEvent>,
) {
    let Some(placement) = session.place_initial(&*geometry, &mut rng.0) else {
        return;
    };
    if let Some(appearance) = session.decline_appearance() {
        moved.send(DeclineMovedEvent {
            attempts: session.attempts(),
            stage: session.stage(),
            placement,
            appearance,
        });
    }
}

fn handle_decline_attempts(
    mut requests: EventReader<DeclineAttemptEvent>,
    mut session: ResMut<ProposalSession>,
    geometry: Res<LayoutGeometry>,
    mut rng: ResMut<SessionRng>,
    mut moved: EventWriter<DeclineMovedEvent>,
    mut hidden: EventWriter<DeclineHiddenEvent>,
    mut spawned: EventWriter<AcceptTargetsSpawnedEvent>,
) {
    for _ in requests.read() {
        let outcome = session.on_decline_attempt(&*geometry, &mut rng.0);

        if !outcome.spawned().is_empty() {
            spawned.send(AcceptTargetsSpawnedEvent {
                created: outcome.spawned().to_vec(),
                retained: session.spawned().len(),
            });
        }

        match outcome {
            DeclineOutcome::Moved {
                attempts,
                stage,
                placement,
                appearance,
                ..
            } => {
                moved.send(DeclineMovedEvent {
                    attempts,
                    stage,
                    placement,
                    appearance,
                });
            }
            DeclineOutcome::Suppressed { attempts, .. } => {
                hidden.send(DeclineHiddenEvent {
                    attempts,
                    last_position: session.decline_position(),
                });
            }
            DeclineOutcome::Ignored => {}
        }
    }
}

fn handle_accept_activations(
    mut activations: EventReader<AcceptActivateEvent>,
    mut session: ResMut<ProposalSession>,
    mut accepted: EventWriter<ProposalAcceptedEvent>,
) {
    for event in activations.read() {
        if session.on_accept_activate(event.target) {
            accepted.send(ProposalAcceptedEvent {
                attempts: session.attempts(),
                target: event.target,
            });
        }
    }
}

fn tick_celebration(
    time: Res<Time>,
    mut session: ResMut<ProposalSession>,
    mut ended: EventWriter<CelebrationEndedEvent>,
) {
    if !session.is_celebrating() {
        return;
    }
    if session.tick_celebration(time.delta_secs()) {
        ended.send(CelebrationEndedEvent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ProposalState;
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(ProposalPlugin::default());
        app.insert_resource(LayoutGeometry(StaticGeometry::new(
            Bounds::new(0.0, 0.0, 500.0, 400.0),
            Bounds::new(180.0, 300.0, 140.0, 52.0),
        )));
        app.update();
        app
    }

    fn session(app: &App) -> &ProposalSession {
        app.world().resource::<ProposalSession>()
    }

    #[test]
    fn test_startup_places_decline_target() {
        let app = test_app();
        let s = session(&app);
        assert_eq!(s.attempts(), 0);
        assert_ne!(s.decline_position(), Point::new(200.0, 180.0));
        // sent during Startup, so it sits in the previous-update buffer
        assert_eq!(app.world().resource::<Events<DeclineMovedEvent>>().len(), 1);
    }

    #[test]
    fn test_decline_events_drive_session() {
        let mut app = test_app();
        for _ in 0..3 {
            app.world_mut().send_event(DeclineAttemptEvent);
        }
        app.update();
        assert_eq!(session(&app).attempts(), 3);
        assert_eq!(session(&app).stage(), 2);
    }

    #[test]
    fn test_spawn_event_after_threshold() {
        let mut app = test_app();
        for _ in 0..9 {
            app.world_mut().send_event(DeclineAttemptEvent);
        }
        app.update();
        assert_eq!(session(&app).spawned().len(), 2);
        let spawned: Vec<_> = app
            .world_mut()
            .resource_mut::<Events<AcceptTargetsSpawnedEvent>>()
            .drain()
            .collect();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].created.len(), 2);
    }

    #[test]
    fn test_accept_ends_session_and_ignores_later_declines() {
        let mut app = test_app();
        app.world_mut().send_event(DeclineAttemptEvent);
        app.world_mut().send_event(AcceptActivateEvent {
            target: AcceptTarget::Primary,
        });
        app.update();
        assert_eq!(session(&app).state(), ProposalState::Success);
        assert_eq!(session(&app).attempts(), 1);

        app.world_mut().send_event(DeclineAttemptEvent);
        app.update();
        assert_eq!(session(&app).attempts(), 1);
        assert_eq!(session(&app).state(), ProposalState::Success);
    }

    #[test]
    fn test_celebration_ends_after_duration() {
        let mut app = test_app();
        app.world_mut().send_event(AcceptActivateEvent {
            target: AcceptTarget::Primary,
        });
        app.update();
        assert!(session(&app).is_celebrating());

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(8));
        app.update();
        assert!(!session(&app).is_celebrating());
        assert!(session(&app).is_success());
    }
}
