//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Generation state of one file as shown on its bar
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileProgress {
    /// Display name, prefixed with a check mark once done
    pub name: String,
    /// Cells resolved in the current attempt
    pub resolved: usize,
    /// Cells in the output grid
    pub total: usize,
    /// Contradiction restarts so far
    pub restarts: usize,
}

/// Coordinates progress display for batch operations
///
/// Automatically switches between individual progress bars (for small batches)
/// and a single batch progress bar (for large batches) based on file count.
/// A file's bar counts resolved cells, so it drops back after a restart.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
    file_states: Vec<FileProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_count: 0,
            file_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of files announced by [`ProgressManager::initialize`]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Configure progress bar for a new file with `total_cells` to resolve
    pub fn start_file(&mut self, index: usize, path: &Path, total_cells: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileProgress::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileProgress {
                name,
                resolved: 0,
                total: total_cells,
                restarts: 0,
            };
        }
        self.update_bars();
    }

    /// Report resolved cells and restarts after an engine step
    pub fn update_cells(&mut self, index: usize, resolved: usize, restarts: usize) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.resolved = resolved;
            state.restarts = restarts;
        }
        self.update_bars();
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.resolved = state.total;
        }
        self.update_bars();
    }

    /// Progress recorded for a file
    pub fn state(&self, index: usize) -> Option<&FileProgress> {
        self.file_states.get(index)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active files
    fn update_bars(&self) {
        let active: Vec<&FileProgress> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, state) in visible.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(state.total as u64);
                bar.set_position(state.resolved as u64);
                bar.set_message(progress_message(state));
                bar.set_prefix(state.name.clone());
            }
        }

        for bar_idx in visible.len()..self.file_bars.len() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}

/// Bar message such as `" 12/900 (3 restarts)"`
pub fn progress_message(state: &FileProgress) -> String {
    let width = state.total.to_string().len();
    let mut message = format!("{:>width$}/{}", state.resolved, state.total);
    match state.restarts {
        0 => {}
        1 => message.push_str(" (1 restart)"),
        n => message.push_str(&format!(" ({n} restarts)")),
    }
    message
}
