//! Output grid state for wave function collapse
//!
//! Every cell is in one of three states. `Unresolved` stands for "any tile is
//! still possible" without materialising the full candidate set, which keeps
//! untouched cells cheap and distinguishes "not yet computed" from "computed
//! and still unrestricted". The grid wraps toroidally at its borders.

use ndarray::Array2;

use crate::algorithm::bitset::TileSet;
use crate::spatial::geometry::Position;

/// Possibility state of a single grid cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    /// No propagation has reached this cell; every tile is possible
    Unresolved,
    /// Tiles still possible after propagation (at least two)
    Candidates(TileSet),
    /// The cell has been committed to a single tile
    Resolved(usize),
}

impl CellState {
    /// Whether the cell has been committed to a tile
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Whether the cell has not been reached by propagation yet
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// Whether the cell still needs work (unresolved or holding candidates)
    pub const fn is_open(&self) -> bool {
        !self.is_resolved()
    }

    /// The committed tile, if any
    pub const fn resolved_tile(&self) -> Option<usize> {
        match self {
            Self::Resolved(tile) => Some(*tile),
            _ => None,
        }
    }
}

/// Fixed-size toroidal grid of cell states
///
/// Tracks how many cells are not yet resolved. The count starts at
/// `width * height`, drops by one each time a cell enters
/// [`CellState::Resolved`] and returns to `width * height` on [`Grid::reset`].
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<CellState>,
    unresolved_count: usize,
}

impl Grid {
    /// Create a grid with every cell unresolved
    ///
    /// Dimensions are expected to be non-zero; callers validate them.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), CellState::Unresolved),
            unresolved_count: width * height,
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells not yet resolved
    pub const fn unresolved_count(&self) -> usize {
        self.unresolved_count
    }

    /// Whether every cell is resolved
    pub const fn is_complete(&self) -> bool {
        self.unresolved_count == 0
    }

    /// State of the cell at `position`, or `None` when out of bounds
    pub fn cell(&self, position: Position) -> Option<&CellState> {
        self.cells.get(position)
    }

    /// Commit the cell at `position` to `tile`
    ///
    /// The unresolved count only drops when the cell was not already
    /// resolved. Out-of-bounds positions are ignored.
    pub fn resolve(&mut self, position: Position, tile: usize) {
        if let Some(cell) = self.cells.get_mut(position) {
            if !cell.is_resolved() {
                self.unresolved_count = self.unresolved_count.saturating_sub(1);
            }
            *cell = CellState::Resolved(tile);
        }
    }

    /// Replace the candidate set of an open cell
    ///
    /// A set of exactly one tile resolves the cell instead. Resolved cells and
    /// out-of-bounds positions are left untouched.
    pub fn narrow(&mut self, position: Position, candidates: TileSet) {
        if let Some(tile) = candidates.single_tile() {
            self.resolve(position, tile);
            return;
        }
        if let Some(cell) = self.cells.get_mut(position) {
            if cell.is_open() {
                *cell = CellState::Candidates(candidates);
            }
        }
    }

    /// Discard all progress and mark every cell unresolved again
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Unresolved);
        self.unresolved_count = self.cells.len();
    }

    /// First open cell in row-major order
    pub fn first_open(&self) -> Option<Position> {
        self.cells
            .indexed_iter()
            .find(|(_, cell)| cell.is_open())
            .map(|((row, col), _)| [row, col])
    }

    /// Iterate all cells with their positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &CellState)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ([row, col], cell))
    }

    /// Resolved tile index of every cell, or `None` while any cell is open
    pub fn resolved_tiles(&self) -> Option<Array2<usize>> {
        let mut tiles = Array2::zeros(self.cells.dim());
        for ((row, col), cell) in self.cells.indexed_iter() {
            let tile = cell.resolved_tile()?;
            if let Some(slot) = tiles.get_mut([row, col]) {
                *slot = tile;
            }
        }
        Some(tiles)
    }
}
