//! Tile extraction from source pixel grids
//!
//! Every source pixel anchors an n x n block (its top-left corner), read with
//! toroidal wrap at the source borders. Blocks are identified by a hash of
//! their content, so identical blocks anywhere in the source share one
//! [`TileId`]. Only the anchor pixel of a block is kept for rendering, since
//! each output cell contributes exactly one pixel.

use ndarray::Array2;
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::analysis::adjacency::AdjacencyModel;
use crate::analysis::frequency::FrequencyModel;
use crate::analysis::rules::RuleSet;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::geometry::neighbors_of;

/// Stable identifier of one distinct tile pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Representative RGBA colour of every known tile
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    colors: BTreeMap<TileId, [u8; 4]>,
}

impl TileCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the colour of a tile; the first colour recorded wins
    pub fn insert(&mut self, tile: TileId, color: [u8; 4]) {
        self.colors.entry(tile).or_insert(color);
    }

    /// Colour of a tile, if known
    pub fn color(&self, tile: TileId) -> Option<[u8; 4]> {
        self.colors.get(&tile).copied()
    }

    /// Number of tiles in the catalog
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the catalog holds no tiles
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Channel-wise integer mean of all tile colours
    ///
    /// Falls back to mid grey for an empty catalog.
    pub fn average_color(&self) -> [u8; 4] {
        average_color(self.colors.values().copied())
    }
}

/// Channel-wise integer mean of a sequence of colours, mid grey when empty
pub fn average_color(colors: impl IntoIterator<Item = [u8; 4]>) -> [u8; 4] {
    let mut sums = [0u64; 4];
    let mut count = 0u64;
    for color in colors {
        for (sum, channel) in sums.iter_mut().zip(color) {
            *sum += u64::from(channel);
        }
        count += 1;
    }

    if count == 0 {
        return [128, 128, 128, 255];
    }
    sums.map(|sum| (sum / count) as u8)
}

/// Tile layout of a source image together with the tile catalog
pub struct TileExtractor {
    tile_size: usize,
    tile_ids: Array2<TileId>,
    catalog: TileCatalog,
}

impl TileExtractor {
    /// Assign a tile id to every source position
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero or the source has no pixels
    pub fn extract(source: &Array2<[u8; 4]>, tile_size: usize) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"must be at least 1",
            ));
        }
        if source.is_empty() {
            return Err(invalid_parameter(
                "source",
                &"0x0",
                &"source image has no pixels",
            ));
        }

        let (rows, cols) = source.dim();
        let mut tile_ids = Array2::from_elem((rows, cols), TileId(0));
        let mut catalog = TileCatalog::new();

        for ((row, col), slot) in tile_ids.indexed_iter_mut() {
            let id = hash_block(source, row, col, tile_size);
            *slot = id;
            if let Some(&anchor) = source.get([row, col]) {
                catalog.insert(id, anchor);
            }
        }

        Ok(Self {
            tile_size,
            tile_ids,
            catalog,
        })
    }

    /// Edge length of the extracted blocks
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Tile id anchored at every source position
    pub const fn tile_ids(&self) -> &Array2<TileId> {
        &self.tile_ids
    }

    /// Representative colours of the extracted tiles
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Occurrence count of every tile across the source positions
    pub fn frequency_model(&self) -> FrequencyModel {
        let mut frequency = FrequencyModel::new();
        for &id in &self.tile_ids {
            frequency.record(id);
        }
        frequency
    }

    /// Directional adjacencies observed between neighbouring source positions
    ///
    /// # Errors
    ///
    /// Returns an error only if an observed tile was not registered, which
    /// would indicate an internal inconsistency
    pub fn adjacency_model(&self) -> Result<AdjacencyModel> {
        let mut adjacency = AdjacencyModel::new();
        for &id in &self.tile_ids {
            adjacency.add_vertex(id);
        }

        let (rows, cols) = self.tile_ids.dim();
        for ((row, col), &tile) in self.tile_ids.indexed_iter() {
            for (neighbor, direction) in neighbors_of([row, col], cols, rows) {
                if let Some(&source) = self.tile_ids.get(neighbor) {
                    // `tile` lies at `direction` relative to the neighbouring tile
                    adjacency.add_edge(source, tile, direction)?;
                }
            }
        }
        Ok(adjacency)
    }

    /// Validated rule set built from the observed adjacencies and frequencies
    ///
    /// # Errors
    ///
    /// Returns an error if the adjacency or frequency models are inconsistent
    pub fn rules(&self) -> Result<RuleSet> {
        RuleSet::new(self.adjacency_model()?, self.frequency_model())
    }
}

fn hash_block(source: &Array2<[u8; 4]>, row: usize, col: usize, tile_size: usize) -> TileId {
    let (rows, cols) = source.dim();
    let mut hasher = DefaultHasher::new();
    tile_size.hash(&mut hasher);
    for dr in 0..tile_size {
        for dc in 0..tile_size {
            let pixel = source
                .get([(row + dr) % rows, (col + dc) % cols])
                .copied()
                .unwrap_or_default();
            pixel.hash(&mut hasher);
        }
    }
    TileId(hasher.finish())
}
