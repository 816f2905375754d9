//! Command-line interface for batch processing PNG files with wave function collapse

use crate::algorithm::executor::WaveCollapse;
use crate::algorithm::selection::RandomSelector;
use crate::analysis::patterns::ImageProcessor;
use crate::io::configuration::{
    ANIMATION_SUFFIX, DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_STEP_DELAY_MS,
    DEFAULT_TILE_SIZE, DEFAULT_WIDTH, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, PREVIEW_SUFFIX,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::visualization::{SinkSettings, VisualMode, build_sink};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate tiled images with wave function collapse"
)]
/// Command-line arguments for the generation tool
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Edge length of the source blocks that become tiles
    #[arg(short = 'n', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Output width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Output height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// How to show intermediate steps
    #[arg(short, long, value_enum, default_value_t = VisualMode::Off)]
    pub visualize: VisualMode,

    /// Pixels per cell in preview frames
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Delay between steps in milliseconds (pause in auto mode, frame delay when recording)
    #[arg(short = 'd', long)]
    pub frame_delay: Option<u32>,

    /// Outline resolved cells in preview frames
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Give up after this many contradiction restarts (default: never)
    #[arg(short = 'r', long)]
    pub max_restarts: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short = 'N', long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Reject parameters the engine cannot work with
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size, either output dimension, the cell
    /// size, or the restart limit is zero
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("tile_size", self.tile_size),
            ("width", self.width),
            ("height", self.height),
            ("cell_size", self.cell_size as usize),
            ("max_restarts", self.max_restarts.unwrap_or(1)),
        ];
        for (parameter, value) in positive {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
            }
        }
        Ok(())
    }

    /// Visual sink settings for one input file
    pub fn sink_settings(&self, input_path: &Path) -> SinkSettings {
        SinkSettings {
            mode: self.visualize,
            cell_size: self.cell_size,
            debug: self.debug,
            step_delay: Duration::from_millis(
                self.frame_delay
                    .map_or(DEFAULT_STEP_DELAY_MS, u64::from),
            ),
            frame_delay_ms: self.frame_delay.unwrap_or(GIF_FRAME_DELAY_MS),
            preview_path: sibling_path(input_path, PREVIEW_SUFFIX, "png"),
            animation_path: sibling_path(input_path, ANIMATION_SUFFIX, "gif"),
        }
    }
}

/// Path beside `input_path` named `<stem><suffix>.<extension>`
pub fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Where the generated image for `input_path` is written
pub fn output_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, OUTPUT_SUFFIX, "png")
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Whether `path` is a generated artifact rather than a source image
fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .is_some_and(|stem| {
            [OUTPUT_SUFFIX, PREVIEW_SUFFIX]
                .iter()
                .any(|suffix| stem.ends_with(suffix))
        })
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if parameter validation, target validation, or file
    /// processing fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Input files selected by the target, in sorted order
    ///
    /// A directory contributes every PNG that is not itself an output of this
    /// tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG file nor a readable
    /// directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"file must be a PNG image",
                ));
            }
            return Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            });
        }

        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a PNG file or directory",
            ));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(target).with_path(target)? {
            let path = entry.with_path(target)?.path();
            if is_png(&path) && !is_generated(&path) && self.should_process_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(input_path).exists() {
            warn!(file = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output = output_path(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, self.cli.width * self.cli.height);
        }

        let image_processor = ImageProcessor::from_png_path(input_path)?;
        let (rules, catalog) = image_processor.extract_rules(self.cli.tile_size)?;
        let sink = build_sink(&self.cli.sink_settings(input_path), &rules, &catalog)?;

        let mut engine = WaveCollapse::new(
            &rules,
            self.cli.width,
            self.cli.height,
            Box::new(RandomSelector::new(self.cli.seed)),
        )?
        .with_sink(sink);
        if let Some(limit) = self.cli.max_restarts {
            engine = engine.with_restart_limit(limit)?;
        }

        while !engine.is_complete() {
            engine.step()?;
            if let Some(ref mut pm) = self.progress_manager {
                let grid = engine.grid();
                pm.update_cells(
                    index,
                    grid.len() - grid.unresolved_count(),
                    engine.restarts(),
                );
            }
        }

        let restarts = engine.restarts();
        let steps = engine.iteration();
        let grid = engine.finish()?;
        export_grid_as_png(&grid, &rules, &catalog, &output)?;

        info!(
            file = %input_path.display(),
            output = %output.display(),
            tiles = rules.tile_count(),
            steps,
            restarts,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "generated"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(())
    }
}
