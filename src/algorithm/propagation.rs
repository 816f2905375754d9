//! Constraint propagation after a cell collapses
//!
//! Propagation keeps a LIFO work list (the fringe) of cells whose neighbours
//! changed. Popping the most recently added cell first biases propagation
//! depth-first; the final candidate sets do not depend on that order, but the
//! order in which entropy entries are pushed does. A cell may be reduced many
//! times within one pass, because narrowing a neighbour can narrow it again.

use std::fmt;

use crate::algorithm::bitset::TileSet;
use crate::algorithm::queue::EntropyQueue;
use crate::analysis::rules::RuleSet;
use crate::spatial::geometry::{Position, neighbors_of};
use crate::spatial::grid::{CellState, Grid};

/// A cell was left with no possible tile
///
/// Recoverable: the engine answers it by restarting generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    /// The cell whose candidate set became empty
    pub position: Position,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "contradiction at row {}, column {}",
            self.position[0], self.position[1]
        )
    }
}

/// What a single reduction did to a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    /// The candidate set did not change
    Unchanged,
    /// The candidate set shrank but still holds several tiles
    Narrowed,
    /// The cell was left with exactly one tile
    Resolved(usize),
}

/// Tiles still legal at `position` given its non-unresolved neighbours
///
/// The result is also intersected with the cell's own current state, so a
/// candidate set can only shrink.
pub fn allowed_tiles(grid: &Grid, rules: &RuleSet, position: Position) -> TileSet {
    let mut allowed = match grid.cell(position) {
        Some(CellState::Candidates(set)) => set.clone(),
        Some(CellState::Resolved(tile)) => TileSet::single(rules.tile_count(), *tile),
        Some(CellState::Unresolved) | None => rules.universe(),
    };

    for (neighbor, direction) in neighbors_of(position, grid.width(), grid.height()) {
        match grid.cell(neighbor) {
            Some(CellState::Candidates(set)) => {
                allowed.intersect_with(&rules.support(set, direction));
            }
            Some(CellState::Resolved(tile)) => match rules.allowed(*tile, direction) {
                Some(permitted) => allowed.intersect_with(permitted),
                None => allowed = TileSet::new(rules.tile_count()),
            },
            // Unrestricted neighbours impose nothing
            Some(CellState::Unresolved) | None => {}
        }
    }
    allowed
}

/// Recompute the candidates of `position` from its neighbours
///
/// When the set changes, the cell is narrowed (queued by its new entropy) or
/// resolved (never queued), and every open neighbour is appended to `fringe`,
/// even if it is already there.
///
/// # Errors
///
/// Returns [`Contradiction`] if no tile remains possible. The grid is left as
/// it was for that cell; callers discard the whole grid.
pub fn reduce(
    grid: &mut Grid,
    queue: &mut EntropyQueue,
    rules: &RuleSet,
    position: Position,
    fringe: &mut Vec<Position>,
) -> Result<Reduction, Contradiction> {
    let allowed = allowed_tiles(grid, rules, position);

    let changed = match grid.cell(position) {
        Some(CellState::Unresolved) => true,
        Some(CellState::Candidates(current)) => *current != allowed,
        Some(CellState::Resolved(tile)) => !allowed.contains(*tile),
        None => false,
    };
    if !changed {
        return Ok(Reduction::Unchanged);
    }

    let reduction = match allowed.count() {
        0 => return Err(Contradiction { position }),
        1 => {
            let tile = allowed
                .single_tile()
                .ok_or(Contradiction { position })?;
            grid.resolve(position, tile);
            Reduction::Resolved(tile)
        }
        _ => {
            let entropy = rules.entropy(&allowed);
            grid.narrow(position, allowed);
            queue.push(entropy, position);
            Reduction::Narrowed
        }
    };

    for (neighbor, _) in neighbors_of(position, grid.width(), grid.height()) {
        if grid.cell(neighbor).is_some_and(CellState::is_open) {
            fringe.push(neighbor);
        }
    }
    Ok(reduction)
}

/// Propagate the consequences of a change at `origin` through the grid
///
/// Returns the number of reductions that changed a cell.
///
/// # Errors
///
/// Returns the first [`Contradiction`] encountered; propagation stops there.
pub fn propagate(
    grid: &mut Grid,
    queue: &mut EntropyQueue,
    rules: &RuleSet,
    origin: Position,
) -> Result<usize, Contradiction> {
    let mut fringe: Vec<Position> = neighbors_of(origin, grid.width(), grid.height())
        .into_iter()
        .filter(|&(neighbor, _)| grid.cell(neighbor).is_some_and(CellState::is_open))
        .map(|(neighbor, _)| neighbor)
        .collect();

    let mut changes = 0;
    while let Some(position) = fringe.pop() {
        if reduce(grid, queue, rules, position, &mut fringe)? != Reduction::Unchanged {
            changes += 1;
        }
    }
    Ok(changes)
}
