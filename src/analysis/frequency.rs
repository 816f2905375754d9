//! Occurrence weights of tiles

use std::collections::BTreeMap;

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::tiles::TileId;

/// Positive integer weight of every tile
///
/// Weights drive both entropy computation and weighted random collapse.
#[derive(Clone, Debug, Default)]
pub struct FrequencyModel {
    weights: BTreeMap<TileId, u64>,
}

impl FrequencyModel {
    /// Create a model with no tiles
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `tile`
    pub fn record(&mut self, tile: TileId) {
        *self.weights.entry(tile).or_insert(0) += 1;
    }

    /// Set the weight of `tile` explicitly
    ///
    /// # Errors
    ///
    /// Returns an error if `weight` is zero
    pub fn set_weight(&mut self, tile: TileId, weight: u64) -> Result<()> {
        if weight == 0 {
            return Err(invalid_parameter(
                "weight",
                &weight,
                &format!("tile {tile} must have a positive weight"),
            ));
        }
        self.weights.insert(tile, weight);
        Ok(())
    }

    /// Weight of `tile`, if present
    pub fn weight(&self, tile: TileId) -> Option<u64> {
        self.weights.get(&tile).copied()
    }

    /// Whether `tile` has a weight
    pub fn contains(&self, tile: TileId) -> bool {
        self.weights.contains_key(&tile)
    }

    /// All weighted tiles in ascending order
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.weights.keys().copied()
    }

    /// Sum of all weights
    pub fn total(&self) -> u64 {
        self.weights.values().sum()
    }

    /// Number of weighted tiles
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no tiles are weighted
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
