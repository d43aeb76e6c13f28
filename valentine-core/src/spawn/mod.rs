//! Spawned accept targets
//!
//! Past the spawn threshold every decline attempt scatters extra accept
//! targets across the container. They ignore the exclusion zone on purpose:
//! landing on top of the primary target is fine. The retained list is a
//! bounded FIFO.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::config::ProposalConfig;
use crate::constants::{SPAWN_HEIGHT_JITTER, SPAWN_MIN_HEIGHT, SPAWN_MIN_WIDTH, SPAWN_WIDTH_JITTER};
use crate::geometry::{Bounds, Point, Size};
use crate::random::UniformSource;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnedAcceptTarget {
    pub id: u64,
    pub position: Point,
    pub size: Size,
}

impl SpawnedAcceptTarget {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_parts(self.position, self.size)
    }
}

/// Targets to add after a decline attempt brought the total to `attempts`.
pub fn spawn_count(attempts: u32, config: &ProposalConfig) -> u32 {
    if attempts <= config.spawn_threshold {
        return 0;
    }
    attempts
        .saturating_sub(config.spawn_threshold.saturating_sub(1))
        .min(config.max_spawn_per_attempt)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnedTargets {
    targets: VecDeque<SpawnedAcceptTarget>,
    next_id: u64,
}

impl SpawnedTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SpawnedAcceptTarget> {
        self.targets.iter()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.targets.iter().any(|t| t.id == id)
    }

    pub fn to_vec(&self) -> Vec<SpawnedAcceptTarget> {
        self.targets.iter().copied().collect()
    }

    /// Add `count` randomly placed targets, then evict from the front until
    /// at most `cap` remain. Returns the newly created targets.
    pub fn spawn<R: UniformSource + ?Sized>(
        &mut self,
        count: u32,
        container: &Bounds,
        config: &ProposalConfig,
        rng: &mut R,
    ) -> Vec<SpawnedAcceptTarget> {
        let mut created = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let target = self.make_target(container, config.edge_buffer, rng);
            self.targets.push_back(target);
            created.push(target);
        }

        while self.targets.len() > config.spawn_cap {
            self.targets.pop_front();
        }

        if !created.is_empty() {
            tracing::debug!(
                spawned = created.len(),
                retained = self.targets.len(),
                "accept targets spawned"
            );
        }
        created
    }

    fn make_target<R: UniformSource + ?Sized>(
        &mut self,
        container: &Bounds,
        buffer: f32,
        rng: &mut R,
    ) -> SpawnedAcceptTarget {
        let size = Size::new(
            SPAWN_MIN_WIDTH + rng.next_unit() * SPAWN_WIDTH_JITTER,
            SPAWN_MIN_HEIGHT + rng.next_unit() * SPAWN_HEIGHT_JITTER,
        );
        let max_x = (container.width - buffer - size.width).max(buffer);
        let max_y = (container.height - buffer - size.height).max(buffer);
        let x = buffer + rng.next_unit() * (max_x - buffer);
        let y = buffer + rng.next_unit() * (max_y - buffer);

        let id = self.next_id;
        self.next_id += 1;
        SpawnedAcceptTarget {
            id,
            position: Point::new(x, y),
            size,
        }
    }
}
