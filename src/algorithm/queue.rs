//! Lowest-entropy-first ordering of cells awaiting collapse
//!
//! Entries are never removed when the cell they reference changes. A cell
//! narrowed twice has two entries, and a cell resolved through propagation
//! keeps whatever entries it had. Consumers skip entries whose cell is already
//! resolved when they pop them ([`EntropyQueue::pop_open`]), which avoids a
//! position-to-heap-index map.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::spatial::geometry::Position;
use crate::spatial::grid::{CellState, Grid};

/// A cell position keyed by the entropy it had when pushed
#[derive(Clone, Copy, Debug)]
pub struct QueueEntry {
    /// Entropy of the cell at push time
    pub entropy: f64,
    /// Grid position of the cell
    pub position: Position,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // Ties on entropy fall back to row-major position order
    fn cmp(&self, other: &Self) -> Ordering {
        self.entropy
            .total_cmp(&other.entropy)
            .then_with(|| self.position.cmp(&other.position))
    }
}

/// Min-heap of cells by entropy with lazy invalidation
#[derive(Clone, Debug, Default)]
pub struct EntropyQueue {
    heap: BinaryHeap<Reverse<QueueEntry>>,
}

impl EntropyQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `position` with its current entropy
    pub fn push(&mut self, entropy: f64, position: Position) {
        self.heap.push(Reverse(QueueEntry { entropy, position }));
    }

    /// Remove and return the lowest-entropy entry, stale or not
    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    /// Pop entries until one references a cell that is still open in `grid`
    ///
    /// Stale entries for resolved cells are discarded on the way.
    pub fn pop_open(&mut self, grid: &Grid) -> Option<Position> {
        while let Some(entry) = self.pop() {
            if grid.cell(entry.position).is_some_and(CellState::is_open) {
                return Some(entry.position);
            }
        }
        None
    }

    /// Lowest-entropy entry without removing it
    pub fn peek(&self) -> Option<&QueueEntry> {
        self.heap.peek().map(|Reverse(entry)| entry)
    }

    /// Iterate entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> + '_ {
        self.heap.iter().map(|Reverse(entry)| entry)
    }

    /// Number of entries, including stale ones
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue holds no entries
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
