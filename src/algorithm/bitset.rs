use bitvec::prelude::*;
use std::fmt;

/// Fixed-capacity set of dense tile indices
///
/// Backs the candidate sets of grid cells. Indices are 0-based positions in
/// the rule set's tile ordering, so membership tests and set algebra over the
/// whole tile universe are single passes over a bit vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSet {
    bits: BitVec,
}

impl TileSet {
    /// Create a set able to hold `capacity` tiles, with none present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every tile below `capacity`
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Create a set holding exactly one tile
    pub fn single(capacity: usize, tile: usize) -> Self {
        let mut set = Self::new(capacity);
        set.insert(tile);
        set
    }

    /// Build a set from an iterator of tile indices
    ///
    /// Indices at or beyond `capacity` are ignored.
    pub fn from_indices(capacity: usize, tiles: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(capacity);
        for tile in tiles {
            set.insert(tile);
        }
        set
    }

    /// Number of tiles this set can address
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile index; out-of-range indices are ignored
    pub fn insert(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Keep only tiles also present in `other`
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Add every tile present in `other`
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The only tile in the set, if it holds exactly one
    pub fn single_tile(&self) -> Option<usize> {
        let mut ones = self.bits.iter_ones();
        match (ones.next(), ones.next()) {
            (Some(tile), None) => Some(tile),
            _ => None,
        }
    }

    /// Iterate present tile indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Collect all present tile indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileSet({} tiles: {:?})", self.count(), self.to_vec())
    }
}
