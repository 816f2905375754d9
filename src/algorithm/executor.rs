use tracing::{debug, info};

use crate::{
    algorithm::propagation::{Contradiction, propagate},
    algorithm::queue::EntropyQueue,
    algorithm::selection::TileSampler,
    analysis::rules::RuleSet,
    io::error::{AlgorithmError, Result, computation_error, invalid_parameter},
    io::visualization::{NullSink, VisualSink},
    spatial::geometry::Position,
    spatial::grid::{CellState, Grid},
};

/// Result of a single engine step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was collapsed and its consequences propagated
    Collapsed {
        /// The collapsed cell
        position: Position,
        /// The tile index it collapsed to
        tile: usize,
        /// Reductions that changed a cell during propagation
        changes: usize,
    },
    /// Propagation hit a contradiction and the grid was rebuilt from scratch
    Restarted {
        /// The cell whose collapse led to the contradiction
        position: Position,
        /// The cell left without candidates
        contradiction: Position,
    },
    /// Every cell was already resolved; nothing was done
    Complete,
}

/// Wave function collapse engine
///
/// Repeatedly collapses the lowest-entropy open cell, propagates the
/// consequences to its neighbours, and rebuilds the whole grid when a
/// contradiction appears. There is no backtracking: a contradiction discards
/// every decision made so far and generation resumes from the cell that was
/// being collapsed. Unless a restart limit is set, an unsatisfiable rule set
/// makes [`WaveCollapse::generate`] run forever.
pub struct WaveCollapse<'r> {
    rules: &'r RuleSet,
    grid: Grid,
    queue: EntropyQueue,
    cursor: Position,
    sampler: Box<dyn TileSampler + 'r>,
    sink: Box<dyn VisualSink + 'r>,
    restart_limit: Option<usize>,
    restarts: usize,
    iteration: usize,
}

impl<'r> WaveCollapse<'r> {
    /// Create an engine for a `width` x `height` output
    ///
    /// The starting cell is drawn uniformly at random from `sampler`.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn new(
        rules: &'r RuleSet,
        width: usize,
        height: usize,
        mut sampler: Box<dyn TileSampler + 'r>,
    ) -> Result<Self> {
        if width == 0 {
            return Err(invalid_parameter("width", &width, &"must be at least 1"));
        }
        if height == 0 {
            return Err(invalid_parameter("height", &height, &"must be at least 1"));
        }

        let cursor = sampler.choose_position(width, height);
        Ok(Self {
            rules,
            grid: Grid::new(width, height),
            queue: EntropyQueue::new(),
            cursor,
            sampler,
            sink: Box::new(NullSink),
            restart_limit: None,
            restarts: 0,
            iteration: 0,
        })
    }

    /// Receive a grid snapshot after every step
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn VisualSink + 'r>) -> Self {
        self.sink = sink;
        self
    }

    /// Give up with [`AlgorithmError::RestartLimitExceeded`] after `limit`
    /// restarts instead of retrying forever
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is zero
    pub fn with_restart_limit(mut self, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(invalid_parameter(
                "max_restarts",
                &limit,
                &"must be at least 1",
            ));
        }
        self.restart_limit = Some(limit);
        Ok(self)
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Pending entropy entries, stale ones included
    pub const fn queue(&self) -> &EntropyQueue {
        &self.queue
    }

    /// Rules this engine generates from
    pub const fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Cell that will be collapsed next if it is still open
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Contradiction restarts performed so far
    pub const fn restarts(&self) -> usize {
        self.restarts
    }

    /// Steps performed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether every cell is resolved
    pub const fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    /// Run steps until every cell is resolved and return the grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The visual sink fails to draw or finish
    /// - A configured restart limit is exceeded
    pub fn generate(mut self) -> Result<Grid> {
        while !self.grid.is_complete() {
            self.step()?;
        }
        self.finish()
    }

    /// Hand back the completed grid after driving the engine with [`WaveCollapse::step`]
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A cell is still open
    /// - The visual sink fails to finish
    pub fn finish(mut self) -> Result<Grid> {
        if let Some(position) = self.grid.first_open() {
            return Err(AlgorithmError::UnresolvedCell { position });
        }
        self.sink.finish()?;
        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            iterations = self.iteration,
            restarts = self.restarts,
            "generation complete"
        );
        Ok(self.grid)
    }

    /// Collapse one cell, propagate, and restart on contradiction
    ///
    /// The visual sink sees the grid after every step, including the fresh
    /// grid right after a restart.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The visual sink fails to draw
    /// - A configured restart limit is exceeded
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.grid.is_complete() {
            return Ok(StepOutcome::Complete);
        }
        self.iteration += 1;

        let position = self.next_position();
        let tile = self.collapse(position)?;

        let outcome = match propagate(&mut self.grid, &mut self.queue, self.rules, position) {
            Ok(changes) => StepOutcome::Collapsed {
                position,
                tile,
                changes,
            },
            Err(contradiction) => {
                self.restart(contradiction)?;
                StepOutcome::Restarted {
                    position,
                    contradiction: contradiction.position,
                }
            }
        };

        self.sink.draw(&self.grid, self.rules)?;
        Ok(outcome)
    }

    /// Advance the cursor past resolved cells using the entropy queue
    fn next_position(&mut self) -> Position {
        if self.grid.cell(self.cursor).is_some_and(CellState::is_open) {
            return self.cursor;
        }
        // An exhausted queue with open cells left only happens with unusual
        // rule sets; fall back to scanning the grid.
        if let Some(position) = self
            .queue
            .pop_open(&self.grid)
            .or_else(|| self.grid.first_open())
        {
            self.cursor = position;
        }
        self.cursor
    }

    /// Commit an open cell to a tile drawn by weight from its candidates
    fn collapse(&mut self, position: Position) -> Result<usize> {
        let candidates: Vec<usize> = match self.grid.cell(position) {
            Some(CellState::Unresolved) => (0..self.rules.tile_count()).collect(),
            Some(CellState::Candidates(set)) => set.to_vec(),
            Some(CellState::Resolved(_)) | None => {
                return Err(computation_error(
                    "collapse",
                    &format!(
                        "cell at row {}, column {} is not open",
                        position[0], position[1]
                    ),
                ));
            }
        };

        let weights: Vec<f64> = candidates
            .iter()
            .map(|&tile| self.rules.weight(tile) as f64)
            .collect();
        let choice = self.sampler.choose_weighted(&weights);
        let tile = candidates
            .get(choice)
            .copied()
            .ok_or(AlgorithmError::InvalidTileIndex {
                index: choice,
                max_tiles: candidates.len(),
            })?;

        self.grid.resolve(position, tile);
        Ok(tile)
    }

    /// Discard the grid and queue after a contradiction
    ///
    /// The cursor is kept, so the next step collapses the same coordinates in
    /// the fresh grid.
    fn restart(&mut self, contradiction: Contradiction) -> Result<()> {
        self.restarts += 1;
        debug!(
            iteration = self.iteration,
            restarts = self.restarts,
            row = contradiction.position[0],
            col = contradiction.position[1],
            "contradiction, restarting generation"
        );

        if let Some(limit) = self.restart_limit
            && self.restarts > limit
        {
            return Err(AlgorithmError::RestartLimitExceeded {
                restarts: self.restarts,
                limit,
            });
        }

        self.grid.reset();
        self.queue.clear();
        Ok(())
    }
}
