//! Random choices made by the engine
//!
//! The engine draws randomness in exactly two places: the starting cell and
//! the tile a cell collapses to. Both go through [`TileSampler`] so tests can
//! substitute a scripted source.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::math::probability::cumulative_choice;
use crate::spatial::geometry::Position;

/// Source of the engine's random decisions
pub trait TileSampler {
    /// Index into `weights`, drawn with probability proportional to weight
    fn choose_weighted(&mut self, weights: &[f64]) -> usize;

    /// Uniformly random position on a `width` x `height` grid
    fn choose_position(&mut self, width: usize, height: usize) -> Position;
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Wrap an already seeded generator
    pub const fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl TileSampler for RandomSelector {
    fn choose_weighted(&mut self, weights: &[f64]) -> usize {
        let unit = self.rng.random::<f64>();
        cumulative_choice(weights, unit)
    }

    fn choose_position(&mut self, width: usize, height: usize) -> Position {
        let row = self.rng.random_range(0..height.max(1));
        let col = self.rng.random_range(0..width.max(1));
        [row, col]
    }
}
