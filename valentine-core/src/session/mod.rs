//! Proposal session state machine
//!
//! Proposing → Success
//!
//! While Proposing, decline attempts raise the attempt count, which drives
//! stage, mood, decline placement and accept-target spawning without ever
//! changing the outer state. The first accept activation (primary or any
//! retained spawned target) moves to Success, which is terminal.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ProposalConfig;
use crate::constants::{INITIAL_DECLINE_X, INITIAL_DECLINE_Y};
use crate::geometry::{GeometryProvider, Point};
use crate::placement::{place_decline_target, Placement, PlacementRequest};
use crate::random::UniformSource;
use crate::spawn::{spawn_count, SpawnedAcceptTarget, SpawnedTargets};
use crate::stage::{
    accept_appearance, decline_appearance, derive_decline_level, derive_mood, derive_stage,
    hint_text, AcceptAppearance, DeclineAppearance, Mood,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProposalState {
    #[default]
    Proposing,
    Success,
}

/// Which accept target was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptTarget {
    Primary,
    Spawned(u64),
}

/// What a decline attempt did
#[derive(Debug, Clone, PartialEq)]
pub enum DeclineOutcome {
    /// Session already accepted; nothing changed
    Ignored,
    /// Decline target moved
    Moved {
        attempts: u32,
        stage: u32,
        placement: Placement,
        appearance: DeclineAppearance,
        spawned: Vec<SpawnedAcceptTarget>,
    },
    /// Decline target is past its visible range and no longer rendered
    Suppressed {
        attempts: u32,
        stage: u32,
        spawned: Vec<SpawnedAcceptTarget>,
    },
}

impl DeclineOutcome {
    pub fn spawned(&self) -> &[SpawnedAcceptTarget] {
        match self {
            DeclineOutcome::Ignored => &[],
            DeclineOutcome::Moved { spawned, .. } | DeclineOutcome::Suppressed { spawned, .. } => {
                spawned
            }
        }
    }
}

/// Fixed-duration celebration flag raised on acceptance. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Celebration {
    remaining_secs: f32,
}

impl Celebration {
    pub fn start(&mut self, secs: f32) {
        self.remaining_secs = secs;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_secs > 0.0
    }

    /// Returns true on the tick that ends the celebration.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_secs = (self.remaining_secs - dt).max(0.0);
        !self.is_active()
    }
}

/// Serializable view of a session for the renderer
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: ProposalState,
    pub attempts: u32,
    pub stage: u32,
    pub decline_level: u32,
    pub mood: Mood,
    pub hint: Option<&'static str>,
    pub decline_position: Point,
    pub decline: Option<DeclineAppearance>,
    pub accept: AcceptAppearance,
    pub spawned: Vec<SpawnedAcceptTarget>,
    pub celebrating: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct ProposalSession {
    config: ProposalConfig,
    state: ProposalState,
    attempts: u32,
    decline_position: Point,
    spawned: SpawnedTargets,
    celebration: Celebration,
}

impl Default for ProposalSession {
    fn default() -> Self {
        Self::new(ProposalConfig::default())
    }
}

impl ProposalSession {
    pub fn new(config: ProposalConfig) -> Self {
        Self {
            config,
            state: ProposalState::Proposing,
            attempts: 0,
            decline_position: Point::new(INITIAL_DECLINE_X, INITIAL_DECLINE_Y),
            spawned: SpawnedTargets::new(),
            celebration: Celebration::default(),
        }
    }

    pub fn config(&self) -> &ProposalConfig {
        &self.config
    }

    pub fn state(&self) -> ProposalState {
        self.state
    }

    pub fn is_success(&self) -> bool {
        self.state == ProposalState::Success
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn stage(&self) -> u32 {
        derive_stage(self.attempts)
    }

    pub fn decline_level(&self) -> u32 {
        derive_decline_level(self.attempts)
    }

    pub fn mood(&self) -> Mood {
        derive_mood(self.attempts, self.is_success())
    }

    pub fn decline_position(&self) -> Point {
        self.decline_position
    }

    pub fn decline_appearance(&self) -> Option<DeclineAppearance> {
        decline_appearance(self.stage(), self.decline_level())
    }

    pub fn spawned(&self) -> &SpawnedTargets {
        &self.spawned
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_active()
    }

    /// Mount-time placement; does not count as an attempt.
    pub fn place_initial<G, R>(&mut self, geometry: &G, rng: &mut R) -> Option<Placement>
    where
        G: GeometryProvider + ?Sized,
        R: UniformSource + ?Sized,
    {
        if self.is_success() {
            return None;
        }
        let appearance = self.decline_appearance()?;
        let placement = self.place(geometry, &appearance, rng);
        Some(placement)
    }

    /// Hover-start or activation of the decline target.
    pub fn on_decline_attempt<G, R>(&mut self, geometry: &G, rng: &mut R) -> DeclineOutcome
    where
        G: GeometryProvider + ?Sized,
        R: UniformSource + ?Sized,
    {
        if self.is_success() {
            warn!("decline attempt after acceptance ignored");
            return DeclineOutcome::Ignored;
        }

        self.attempts = self.attempts.saturating_add(1);
        let attempts = self.attempts;
        let stage = self.stage();

        let outcome = match self.decline_appearance() {
            Some(appearance) => {
                let placement = self.place(geometry, &appearance, rng);
                let spawned = self.spawn(geometry, rng);
                DeclineOutcome::Moved {
                    attempts,
                    stage,
                    placement,
                    appearance,
                    spawned,
                }
            }
            None => {
                let spawned = self.spawn(geometry, rng);
                DeclineOutcome::Suppressed {
                    attempts,
                    stage,
                    spawned,
                }
            }
        };

        tracing::debug!(attempts, stage, mood = self.mood().as_str(), "decline attempt");
        outcome
    }

    /// Activation of the primary or a spawned accept target. Returns true
    /// only on the transition into Success.
    pub fn on_accept_activate(&mut self, target: AcceptTarget) -> bool {
        if self.is_success() {
            return false;
        }
        if let AcceptTarget::Spawned(id) = target {
            if !self.spawned.contains(id) {
                warn!(id, "activation of unknown spawned accept target ignored");
                return false;
            }
        }

        self.state = ProposalState::Success;
        self.celebration.start(self.config.celebration_secs);
        info!(attempts = self.attempts, ?target, "proposal accepted");
        true
    }

    /// Advance the celebration timer. Returns true when it just ended.
    pub fn tick_celebration(&mut self, dt: f32) -> bool {
        self.celebration.tick(dt)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            attempts: self.attempts,
            stage: self.stage(),
            decline_level: self.decline_level(),
            mood: self.mood(),
            hint: if self.is_success() {
                None
            } else {
                hint_text(self.attempts)
            },
            decline_position: self.decline_position,
            decline: if self.is_success() {
                None
            } else {
                self.decline_appearance()
            },
            accept: accept_appearance(self.stage()),
            spawned: self.spawned.to_vec(),
            celebrating: self.is_celebrating(),
        }
    }

    fn place<G, R>(&mut self, geometry: &G, appearance: &DeclineAppearance, rng: &mut R) -> Placement
    where
        G: GeometryProvider + ?Sized,
        R: UniformSource + ?Sized,
    {
        let request = PlacementRequest {
            container: geometry.container_bounds(),
            accept: geometry.accept_bounds(),
            decline_size: appearance.size,
            prior: Some(self.decline_position),
        };
        let placement = place_decline_target(&request, &self.config, rng);
        self.decline_position = placement.position;
        placement
    }

    fn spawn<G, R>(&mut self, geometry: &G, rng: &mut R) -> Vec<SpawnedAcceptTarget>
    where
        G: GeometryProvider + ?Sized,
        R: UniformSource + ?Sized,
    {
        let count = spawn_count(self.attempts, &self.config);
        if count == 0 {
            return Vec::new();
        }
        let container = geometry.container_bounds();
        self.spawned.spawn(count, &container, &self.config, rng)
    }
}
