//! Tests for frame painting and the visual sinks

#[cfg(test)]
mod tests {
    use clap::ValueEnum;
    use ndarray::array;
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;
    use wavetile::algorithm::bitset::TileSet;
    use wavetile::analysis::patterns::ImageProcessor;
    use wavetile::analysis::rules::RuleSet;
    use wavetile::io::visualization::{
        FramePainter, GifRecorder, NullSink, SinkSettings, StepAndPause, StepAndWait,
        VisualMode, VisualSink, build_sink,
    };
    use wavetile::spatial::grid::{CellState, Grid};
    use wavetile::spatial::tiles::TileCatalog;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn two_tiles() -> (RuleSet, TileCatalog) {
        ImageProcessor::from_pixels(array![[RED, BLUE]])
            .unwrap()
            .extract_rules(1)
            .unwrap()
    }

    fn tile_color(rules: &RuleSet, catalog: &TileCatalog, tile: usize) -> [u8; 4] {
        catalog.color(rules.tile_id(tile).unwrap()).unwrap()
    }

    // Tests each cell state maps to its display colour
    // Verified by painting candidates with the first candidate colour
    #[test]
    fn test_cell_colors() {
        let (rules, catalog) = two_tiles();
        let painter = FramePainter::new(&rules, &catalog, 1).unwrap();
        let mean = [127, 0, 127, 255];

        assert_eq!(painter.cell_color(&CellState::Unresolved), mean);
        assert_eq!(
            painter.cell_color(&CellState::Candidates(TileSet::all(2))),
            mean
        );
        assert_eq!(
            painter.cell_color(&CellState::Resolved(1)),
            tile_color(&rules, &catalog, 1)
        );
    }

    // Tests frames scale by cell size and outline resolved cells in debug mode
    // Verified by outlining every cell
    #[test]
    fn test_paint_debug_outline() {
        let (rules, catalog) = two_tiles();
        let painter = FramePainter::new(&rules, &catalog, 4)
            .unwrap()
            .with_debug(true);
        let mut grid = Grid::new(3, 2);
        grid.resolve([0, 0], 0);

        let frame = painter.paint(&grid);
        assert_eq!(painter.cell_size(), 4);
        assert_eq!(frame.dimensions(), (12, 8));
        assert_eq!(frame.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(1, 1).0, tile_color(&rules, &catalog, 0));
        assert_eq!(frame.get_pixel(4, 0).0, [127, 0, 127, 255]);
    }

    // Tests zero-sized cells are rejected
    // Verified by removing the cell size check
    #[test]
    fn test_painter_rejects_zero_cell_size() {
        let (rules, catalog) = two_tiles();
        assert!(FramePainter::new(&rules, &catalog, 0).is_err());
        assert!(FramePainter::new(&rules, &TileCatalog::new(), 1).is_err());
    }

    // Tests manual mode writes a preview and advances on input or EOF
    // Verified by skipping the preview write
    #[test]
    fn test_step_and_wait() {
        let dir = TempDir::new().unwrap();
        let preview = dir.path().join("preview.png");
        let (rules, catalog) = two_tiles();
        let painter = FramePainter::new(&rules, &catalog, 2).unwrap();
        let mut sink = StepAndWait::new(painter, preview.clone(), Cursor::new(b"\n".to_vec()));
        let grid = Grid::new(3, 3);

        sink.draw(&grid, &rules).unwrap();
        assert!(preview.exists());
        sink.draw(&grid, &rules).unwrap();
        sink.finish().unwrap();
    }

    // Tests auto mode writes a preview each step
    // Verified by writing the preview only on finish
    #[test]
    fn test_step_and_pause() {
        let dir = TempDir::new().unwrap();
        let preview = dir.path().join("step/preview.png");
        let (rules, catalog) = two_tiles();
        let painter = FramePainter::new(&rules, &catalog, 2).unwrap();
        let mut sink = StepAndPause::new(painter, preview.clone(), Duration::ZERO);

        sink.draw(&Grid::new(2, 2), &rules).unwrap();
        let saved = ::image::open(&preview).unwrap();
        assert_eq!((saved.width(), saved.height()), (4, 4));
    }

    // Tests short delays decimate frames but keep the final one
    // Verified by dropping the pending frame on finish
    #[test]
    fn test_gif_recorder_decimation() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("anim.gif");
        let (rules, catalog) = two_tiles();
        let painter = FramePainter::new(&rules, &catalog, 1).unwrap();
        let mut recorder = GifRecorder::new(painter, output.clone(), 5);
        assert_eq!(recorder.skip_factor(), 10);

        let grid = Grid::new(2, 2);
        for _ in 0..25 {
            recorder.draw(&grid, &rules).unwrap();
        }
        assert_eq!(recorder.frame_count(), 2);

        recorder.finish().unwrap();
        assert_eq!(recorder.frame_count(), 3);
        assert!(output.exists());
    }

    // Tests slow delays keep every frame and empty recordings fail
    // Verified by exporting an empty animation
    #[test]
    fn test_gif_recorder_without_frames() {
        let (rules, catalog) = two_tiles();
        let painter = FramePainter::new(&rules, &catalog, 1).unwrap();
        let mut recorder = GifRecorder::new(painter, PathBuf::from("unused.gif"), 100);
        assert_eq!(recorder.skip_factor(), 1);
        assert!(recorder.finish().is_err());
    }

    // Tests mode names and aliases parse
    // Verified by removing the aliases
    #[test]
    fn test_visual_mode_parsing() {
        assert_eq!(VisualMode::from_str("record", true), Ok(VisualMode::Record));
        assert_eq!(VisualMode::from_str("step-and-wait", true), Ok(VisualMode::Manual));
        assert_eq!(VisualMode::from_str("step-and-pause", true), Ok(VisualMode::Auto));
        assert_eq!(VisualMode::from_str("disabled", true), Ok(VisualMode::Off));
        assert_eq!(VisualMode::default(), VisualMode::Off);
    }

    // Tests the factory builds working sinks
    // Verified by ignoring the requested mode
    #[test]
    fn test_build_sink() {
        let dir = TempDir::new().unwrap();
        let (rules, catalog) = two_tiles();
        let mut settings = SinkSettings {
            mode: VisualMode::Off,
            cell_size: 0,
            debug: false,
            step_delay: Duration::ZERO,
            frame_delay_ms: 50,
            preview_path: dir.path().join("p.png"),
            animation_path: dir.path().join("a.gif"),
        };
        let mut sink = build_sink(&settings, &rules, &catalog).unwrap();
        sink.draw(&Grid::new(2, 2), &rules).unwrap();
        assert!(!settings.preview_path.exists());

        settings.mode = VisualMode::Record;
        assert!(build_sink(&settings, &rules, &catalog).is_err());

        settings.cell_size = 1;
        let mut recorder = build_sink(&settings, &rules, &catalog).unwrap();
        recorder.draw(&Grid::new(2, 2), &rules).unwrap();
        recorder.finish().unwrap();
        assert!(settings.animation_path.exists());

        let mut null = NullSink;
        assert!(null.draw(&Grid::new(1, 1), &rules).is_ok());
    }
}
