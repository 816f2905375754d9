//! Directed adjacency rules between tiles
//!
//! A directed multigraph over tile ids. An edge `src -> dst` labelled with a
//! direction means `dst` may appear immediately at that direction of `src`.
//! Self-loops are allowed, as are several edges between the same pair of
//! tiles in different directions.

use std::collections::{BTreeMap, BTreeSet};

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::geometry::Direction;
use crate::spatial::tiles::TileId;

/// Allowed neighbours of every tile, per direction
#[derive(Clone, Debug, Default)]
pub struct AdjacencyModel {
    vertices: BTreeMap<TileId, [BTreeSet<TileId>; 4]>,
}

impl AdjacencyModel {
    /// Create a model with no tiles
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tile; does nothing if it is already present
    pub fn add_vertex(&mut self, tile: TileId) {
        self.vertices.entry(tile).or_default();
    }

    /// Allow `dst` to appear at `direction` relative to `src`
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::UnknownVertex`] if either tile is not registered
    pub fn add_edge(&mut self, src: TileId, dst: TileId, direction: Direction) -> Result<()> {
        if !self.vertices.contains_key(&dst) {
            return Err(AlgorithmError::UnknownVertex { tile: dst });
        }
        let edges = self
            .vertices
            .get_mut(&src)
            .ok_or(AlgorithmError::UnknownVertex { tile: src })?;
        if let Some(allowed) = edges.get_mut(direction.index()) {
            allowed.insert(dst);
        }
        Ok(())
    }

    /// Tiles allowed at `direction` relative to `tile`
    ///
    /// An empty set is a legitimate, fully restrictive answer.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::UnknownVertex`] if `tile` is not registered
    pub fn query(&self, tile: TileId, direction: Direction) -> Result<&BTreeSet<TileId>> {
        self.vertices
            .get(&tile)
            .and_then(|edges| edges.get(direction.index()))
            .ok_or(AlgorithmError::UnknownVertex { tile })
    }

    /// Whether `tile` is registered
    pub fn contains(&self, tile: TileId) -> bool {
        self.vertices.contains_key(&tile)
    }

    /// All registered tiles in ascending order
    pub fn vertices(&self) -> impl Iterator<Item = TileId> + '_ {
        self.vertices.keys().copied()
    }

    /// Number of registered tiles
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether no tiles are registered
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.vertices
            .values()
            .flat_map(|edges| edges.iter().map(BTreeSet::len))
            .sum()
    }
}
