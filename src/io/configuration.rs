//! Runtime configuration defaults

/// Edge length of extracted source blocks
pub const DEFAULT_TILE_SIZE: usize = 2;

/// Output width in cells
pub const DEFAULT_WIDTH: usize = 30;

/// Output height in cells
pub const DEFAULT_HEIGHT: usize = 30;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Visual preview settings
/// Pixels per cell in preview frames
pub const DEFAULT_CELL_SIZE: u32 = 8;
/// Pause between steps in auto mode (milliseconds)
pub const DEFAULT_STEP_DELAY_MS: u64 = 50;
/// Delay between GIF animation frames in record mode (milliseconds)
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Outline colour of resolved cells in debug frames
pub const DEBUG_OUTLINE_COLOR: [u8; 4] = [255, 0, 0, 255];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix of the per-step preview image in manual and auto modes
pub const PREVIEW_SUFFIX: &str = "_preview";
/// Suffix of the recorded animation in record mode
pub const ANIMATION_SUFFIX: &str = "_visualization";
