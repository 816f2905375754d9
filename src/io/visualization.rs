//! Per-step grid snapshots for watching generation
//!
//! The engine hands every intermediate grid to a [`VisualSink`]. The sink is
//! chosen once, up front: do nothing, write a preview image and wait for the
//! user, write a preview image and pause, or record an animated GIF.

use clap::ValueEnum;
use image::{Delay, Frame, Rgba, RgbaImage};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analysis::rules::RuleSet;
use crate::io::configuration::{DEBUG_OUTLINE_COLOR, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::grid::{CellState, Grid};
use crate::spatial::tiles::{TileCatalog, average_color};

/// How intermediate grids are shown during generation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum VisualMode {
    /// No visualisation
    #[default]
    #[value(alias = "disabled")]
    Off,
    /// Write a preview after each step and wait for Enter
    #[value(alias = "step-and-wait")]
    Manual,
    /// Write a preview after each step and pause briefly
    #[value(alias = "step-and-pause")]
    Auto,
    /// Record every step into an animated GIF
    Record,
}

/// Receives a snapshot of the grid after every engine step
pub trait VisualSink {
    /// Show the current grid
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written or awaited
    fn draw(&mut self, grid: &Grid, rules: &RuleSet) -> Result<()>;

    /// Called once after the final step
    ///
    /// # Errors
    ///
    /// Returns an error if buffered output cannot be written
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that ignores every snapshot
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl VisualSink for NullSink {
    fn draw(&mut self, _grid: &Grid, _rules: &RuleSet) -> Result<()> {
        Ok(())
    }
}

/// Renders grid states into RGBA images
///
/// Resolved cells take their tile's colour, cells with candidates the mean of
/// their candidates' colours, and unresolved cells the mean of all tiles.
#[derive(Clone, Debug)]
pub struct FramePainter {
    palette: Vec<[u8; 4]>,
    default_color: [u8; 4],
    cell_size: u32,
    debug: bool,
}

impl FramePainter {
    /// Build a painter with one colour per rule-set tile
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `cell_size` is zero
    /// - A tile of `rules` has no colour in `catalog`
    pub fn new(rules: &RuleSet, catalog: &TileCatalog, cell_size: u32) -> Result<Self> {
        if cell_size == 0 {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &"must be at least 1",
            ));
        }

        let mut palette = Vec::with_capacity(rules.tile_count());
        for index in 0..rules.tile_count() {
            let color = rules
                .tile_id(index)
                .and_then(|tile| catalog.color(tile))
                .ok_or(AlgorithmError::InvalidTileIndex {
                    index,
                    max_tiles: catalog.len(),
                })?;
            palette.push(color);
        }

        Ok(Self {
            default_color: average_color(palette.iter().copied()),
            palette,
            cell_size,
            debug: false,
        })
    }

    /// Outline resolved cells in red
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Pixels per cell edge
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Display colour of a single cell state
    pub fn cell_color(&self, cell: &CellState) -> [u8; 4] {
        match cell {
            CellState::Unresolved => self.default_color,
            CellState::Candidates(set) => {
                average_color(set.iter().filter_map(|tile| self.palette.get(tile).copied()))
            }
            CellState::Resolved(tile) => self
                .palette
                .get(*tile)
                .copied()
                .unwrap_or(self.default_color),
        }
    }

    /// Render the whole grid
    pub fn paint(&self, grid: &Grid) -> RgbaImage {
        let size = self.cell_size;
        let mut img = RgbaImage::new(grid.width() as u32 * size, grid.height() as u32 * size);

        for ([row, col], cell) in grid.iter() {
            let color = Rgba(self.cell_color(cell));
            let outline = self.debug && cell.is_resolved();
            let top = row as u32 * size;
            let left = col as u32 * size;
            for dy in 0..size {
                for dx in 0..size {
                    let on_border = dx == 0 || dy == 0 || dx == size - 1 || dy == size - 1;
                    let pixel = if outline && on_border {
                        Rgba(DEBUG_OUTLINE_COLOR)
                    } else {
                        color
                    };
                    img.put_pixel(left + dx, top + dy, pixel);
                }
            }
        }
        img
    }
}

fn save_frame(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    img.save(path).map_err(|e| AlgorithmError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes a preview after each step, then blocks until a line arrives on `input`
///
/// In the binary `input` is stdin, so each Enter press advances one step.
/// End of input advances without blocking.
pub struct StepAndWait<R> {
    painter: FramePainter,
    preview_path: PathBuf,
    input: R,
}

impl<R: BufRead> StepAndWait<R> {
    /// Create a sink writing previews to `preview_path`
    pub const fn new(painter: FramePainter, preview_path: PathBuf, input: R) -> Self {
        Self {
            painter,
            preview_path,
            input,
        }
    }
}

impl<R: BufRead> VisualSink for StepAndWait<R> {
    fn draw(&mut self, grid: &Grid, _rules: &RuleSet) -> Result<()> {
        save_frame(&self.painter.paint(grid), &self.preview_path)?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|e| AlgorithmError::FileSystem {
                path: PathBuf::from("<stdin>"),
                operation: "wait for input",
                source: e,
            })?;
        Ok(())
    }
}

/// Writes a preview after each step, then sleeps for a fixed delay
pub struct StepAndPause {
    painter: FramePainter,
    preview_path: PathBuf,
    delay: Duration,
}

impl StepAndPause {
    /// Create a sink writing previews to `preview_path`
    pub const fn new(painter: FramePainter, preview_path: PathBuf, delay: Duration) -> Self {
        Self {
            painter,
            preview_path,
            delay,
        }
    }
}

impl VisualSink for StepAndPause {
    fn draw(&mut self, grid: &Grid, _rules: &RuleSet) -> Result<()> {
        save_frame(&self.painter.paint(grid), &self.preview_path)?;
        std::thread::sleep(self.delay);
        Ok(())
    }
}

/// Captures step snapshots and writes them as an animated GIF on finish
///
/// If the requested frame delay is shorter than viewers reliably support,
/// frames are decimated so the apparent animation speed is kept. For example
/// a 5ms delay against a 50ms viewer minimum keeps every 10th frame.
pub struct GifRecorder {
    painter: FramePainter,
    output_path: PathBuf,
    frames: Vec<RgbaImage>,
    pending: Option<RgbaImage>,
    delay_ms: u32,
    skip_factor: usize,
    seen: usize,
}

impl GifRecorder {
    /// Create a recorder writing to `output_path`
    pub fn new(painter: FramePainter, output_path: PathBuf, frame_delay_ms: u32) -> Self {
        let frame_delay_ms = frame_delay_ms.max(1);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        Self {
            painter,
            output_path,
            frames: Vec::new(),
            pending: None,
            delay_ms: frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS),
            skip_factor: skip_factor as usize,
            seen: 0,
        }
    }

    /// Number of frames kept so far
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Keep one in `skip_factor` snapshots
    pub const fn skip_factor(&self) -> usize {
        self.skip_factor
    }
}

impl VisualSink for GifRecorder {
    fn draw(&mut self, grid: &Grid, _rules: &RuleSet) -> Result<()> {
        self.seen += 1;
        let frame = self.painter.paint(grid);
        if self.seen % self.skip_factor == 0 {
            self.frames.push(frame);
            self.pending = None;
        } else {
            self.pending = Some(frame);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(frame) = self.pending.take() {
            self.frames.push(frame);
        }
        if self.frames.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No steps captured for visualization".to_string(),
            });
        }

        let delay = Delay::from_numer_denom_ms(self.delay_ms, 1);
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .map(|img| Frame::from_parts(img.clone(), 0, 0, delay))
            .collect();

        // Final frame displays longer for better visibility
        if let Some(last) = self.frames.last() {
            frames.push(Frame::from_parts(
                last.clone(),
                0,
                0,
                Delay::from_numer_denom_ms(self.delay_ms * 25, 1),
            ));
        }

        if let Some(parent) = self.output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
        let file =
            std::fs::File::create(&self.output_path).map_err(|e| AlgorithmError::FileSystem {
                path: self.output_path.clone(),
                operation: "create file",
                source: e,
            })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: self.output_path.clone(),
                source: e,
            })
    }
}

/// Everything needed to build a sink for one generation run
#[derive(Clone, Debug)]
pub struct SinkSettings {
    /// Which sink to build
    pub mode: VisualMode,
    /// Pixels per cell in frames
    pub cell_size: u32,
    /// Outline resolved cells
    pub debug: bool,
    /// Pause between steps in auto mode
    pub step_delay: Duration,
    /// Frame delay in record mode (milliseconds)
    pub frame_delay_ms: u32,
    /// Preview image written in manual and auto modes
    pub preview_path: PathBuf,
    /// Animation written in record mode
    pub animation_path: PathBuf,
}

/// Build the sink selected by `settings`
///
/// Manual mode waits on standard input.
///
/// # Errors
///
/// Returns an error if a frame painter cannot be built for the rules
pub fn build_sink(
    settings: &SinkSettings,
    rules: &RuleSet,
    catalog: &TileCatalog,
) -> Result<Box<dyn VisualSink>> {
    if settings.mode == VisualMode::Off {
        return Ok(Box::new(NullSink));
    }

    let painter = FramePainter::new(rules, catalog, settings.cell_size)?.with_debug(settings.debug);
    let sink: Box<dyn VisualSink> = match settings.mode {
        VisualMode::Off => Box::new(NullSink),
        VisualMode::Manual => Box::new(StepAndWait::new(
            painter,
            settings.preview_path.clone(),
            std::io::stdin().lock(),
        )),
        VisualMode::Auto => Box::new(StepAndPause::new(
            painter,
            settings.preview_path.clone(),
            settings.step_delay,
        )),
        VisualMode::Record => Box::new(GifRecorder::new(
            painter,
            settings.animation_path.clone(),
            settings.frame_delay_ms,
        )),
    };
    Ok(sink)
}
