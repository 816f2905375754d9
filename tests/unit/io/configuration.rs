//! Tests for configuration defaults

#[cfg(test)]
mod tests {
    use wavetile::io::configuration::{
        ANIMATION_SUFFIX, DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_TILE_SIZE,
        DEFAULT_WIDTH, GIF_FRAME_DELAY_MS, MAX_INDIVIDUAL_PROGRESS_BARS, OUTPUT_SUFFIX,
        PREVIEW_SUFFIX, VIEWER_MIN_FRAME_DELAY_MS,
    };

    // Tests generation defaults
    // Verified by changing constant values
    #[test]
    fn test_generation_defaults() {
        assert_eq!(DEFAULT_TILE_SIZE, 2);
        assert_eq!((DEFAULT_WIDTH, DEFAULT_HEIGHT), (30, 30));
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests recording decimates frames under the viewer minimum
    // Verified by raising the frame delay above the minimum
    #[test]
    fn test_frame_delays() {
        assert_eq!(GIF_FRAME_DELAY_MS, 5);
        assert_eq!(VIEWER_MIN_FRAME_DELAY_MS, 50);
        assert_eq!(VIEWER_MIN_FRAME_DELAY_MS % GIF_FRAME_DELAY_MS, 0);
        assert_eq!(DEFAULT_CELL_SIZE, 8);
    }

    // Tests output names cannot collide
    // Verified by reusing a suffix
    #[test]
    fn test_suffixes_distinct() {
        assert_eq!(OUTPUT_SUFFIX, "_result");
        assert_ne!(OUTPUT_SUFFIX, PREVIEW_SUFFIX);
        assert_ne!(PREVIEW_SUFFIX, ANIMATION_SUFFIX);
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
    }
}
