//! Validated pairing of adjacency rules and tile weights
//!
//! The propagation engine works on dense tile indices. A rule set fixes that
//! indexing (ascending [`TileId`] order, so runs are reproducible) and caches,
//! for every tile and direction, the allowed neighbours as a [`TileSet`].

use std::collections::HashMap;

use crate::algorithm::bitset::TileSet;
use crate::analysis::adjacency::AdjacencyModel;
use crate::analysis::frequency::FrequencyModel;
use crate::io::error::{AlgorithmError, Result};
use crate::math::probability::weighted_entropy;
use crate::spatial::geometry::Direction;
use crate::spatial::tiles::TileId;

/// Read-only adjacency and frequency data shared by generation runs
#[derive(Clone, Debug)]
pub struct RuleSet {
    adjacency: AdjacencyModel,
    frequency: FrequencyModel,
    tiles: Vec<TileId>,
    index: HashMap<TileId, usize>,
    weights: Vec<u64>,
    allowed: [Vec<TileSet>; 4],
}

impl RuleSet {
    /// Pair adjacency rules with tile weights
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The models are empty
    /// - A tile has adjacency rules but no weight, or a weight but no rules
    pub fn new(adjacency: AdjacencyModel, frequency: FrequencyModel) -> Result<Self> {
        let adjacency_only: Vec<TileId> = adjacency
            .vertices()
            .filter(|&tile| !frequency.contains(tile))
            .collect();
        let frequency_only: Vec<TileId> = frequency
            .tiles()
            .filter(|&tile| !adjacency.contains(tile))
            .collect();
        if !adjacency_only.is_empty() || !frequency_only.is_empty() {
            return Err(AlgorithmError::MismatchedUniverse {
                adjacency_only,
                frequency_only,
            });
        }
        if adjacency.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "rule set contains no tiles".to_string(),
            });
        }

        let tiles: Vec<TileId> = adjacency.vertices().collect();
        let index: HashMap<TileId, usize> = tiles
            .iter()
            .enumerate()
            .map(|(position, &tile)| (tile, position))
            .collect();
        let weights: Vec<u64> = tiles
            .iter()
            .map(|&tile| frequency.weight(tile).unwrap_or(0))
            .collect();

        let mut allowed: [Vec<TileSet>; 4] = Default::default();
        for direction in Direction::ALL {
            let mut per_tile = Vec::with_capacity(tiles.len());
            for &tile in &tiles {
                let neighbors = adjacency.query(tile, direction)?;
                per_tile.push(TileSet::from_indices(
                    tiles.len(),
                    neighbors.iter().filter_map(|id| index.get(id).copied()),
                ));
            }
            if let Some(slot) = allowed.get_mut(direction.index()) {
                *slot = per_tile;
            }
        }

        Ok(Self {
            adjacency,
            frequency,
            tiles,
            index,
            weights,
            allowed,
        })
    }

    /// Number of distinct tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile id at a dense index
    pub fn tile_id(&self, index: usize) -> Option<TileId> {
        self.tiles.get(index).copied()
    }

    /// Dense index of a tile id
    pub fn index_of(&self, tile: TileId) -> Option<usize> {
        self.index.get(&tile).copied()
    }

    /// Weight of the tile at a dense index, 0 when out of range
    pub fn weight(&self, index: usize) -> u64 {
        self.weights.get(index).copied().unwrap_or(0)
    }

    /// Tiles allowed at `direction` relative to the tile at `index`
    pub fn allowed(&self, index: usize, direction: Direction) -> Option<&TileSet> {
        self.allowed
            .get(direction.index())
            .and_then(|per_tile| per_tile.get(index))
    }

    /// Union of the tiles allowed at `direction` over every tile of `set`
    pub fn support(&self, set: &TileSet, direction: Direction) -> TileSet {
        let mut support = TileSet::new(self.tile_count());
        for tile in set.iter() {
            if let Some(allowed) = self.allowed(tile, direction) {
                support.union_with(allowed);
            }
        }
        support
    }

    /// Set containing every tile
    pub fn universe(&self) -> TileSet {
        TileSet::all(self.tile_count())
    }

    /// Weighted entropy of a candidate set
    pub fn entropy(&self, set: &TileSet) -> f64 {
        weighted_entropy(set.iter().map(|tile| self.weight(tile) as f64))
    }

    /// Underlying adjacency rules
    pub const fn adjacency(&self) -> &AdjacencyModel {
        &self.adjacency
    }

    /// Underlying tile weights
    pub const fn frequency(&self) -> &FrequencyModel {
        &self.frequency
    }
}
