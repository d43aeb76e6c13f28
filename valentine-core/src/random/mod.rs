//! Pluggable uniform random source.
//!
//! Placement and spawning draw every random number through [`UniformSource`]
//! so callers decide where randomness comes from: a seeded xoshiro generator
//! in the app, a scripted sequence in tests.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Produces uniform samples in `[0, 1)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform sample in `[min, max)`; returns `min` when the range is empty.
    fn next_in(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.next_unit() * (max - min)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f32) as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

impl<R: Rng> UniformSource for RandSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

impl RandSource<Xoshiro256PlusPlus> {
    /// Deterministic generator for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

/// Replays a fixed sequence of samples, wrapping around at the end.
///
/// Values are clamped into `[0, 1)` so a script cannot push a sample
/// outside the range a real generator would produce.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
