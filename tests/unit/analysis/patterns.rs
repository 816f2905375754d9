//! Tests for source image loading and rule extraction

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use tempfile::TempDir;
    use wavetile::AlgorithmError;
    use wavetile::analysis::patterns::ImageProcessor;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    // Tests PNG pixels land in [row, col] order
    // Verified by transposing x and y
    #[test]
    fn test_from_png_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("source.png");
        let mut img = ::image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, ::image::Rgba(WHITE));
        img.save(&path).unwrap();

        let processor = ImageProcessor::from_png_path(&path).unwrap();
        assert_eq!(processor.dimensions(), (2, 3));
        assert_eq!(processor.source_data()[[1, 2]], WHITE);
        assert_eq!(processor.source_data()[[0, 0]], [0, 0, 0, 0]);
        assert_eq!(processor.unique_color_count(), 2);
    }

    // Tests a missing file reports the path
    // Verified by mapping load failures to a generic error
    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.png");
        match ImageProcessor::from_png_path(&path) {
            Err(AlgorithmError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            _ => unreachable!("Expected ImageLoad error type"),
        }
    }

    // Tests empty pixel grids are rejected
    // Verified by removing the emptiness check
    #[test]
    fn test_from_pixels_empty() {
        let empty = Array2::from_elem((0, 4), BLACK);
        assert!(ImageProcessor::from_pixels(empty).is_err());
    }

    // Tests rules and catalog come from the same extraction
    // Verified by returning an empty catalog
    #[test]
    fn test_extract_rules() {
        let processor = ImageProcessor::from_pixels(array![[BLACK, WHITE], [WHITE, BLACK]]).unwrap();
        let (rules, catalog) = processor.extract_rules(1).unwrap();

        assert_eq!(rules.tile_count(), 2);
        assert_eq!(catalog.len(), 2);
        for index in 0..rules.tile_count() {
            let tile = rules.tile_id(index).unwrap();
            assert!(catalog.color(tile).is_some());
        }
        assert!(processor.extract_rules(0).is_err());
    }
}
