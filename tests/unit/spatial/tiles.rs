//! Tests for tile extraction, the tile catalog and derived models

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use std::collections::BTreeSet;
    use wavetile::spatial::geometry::Direction;
    use wavetile::spatial::tiles::{TileCatalog, TileExtractor, TileId, average_color};

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];

    // Tests identical blocks share one id and frequencies count positions
    // Verified by hashing block positions instead of content
    #[test]
    fn test_checkerboard_tiles() {
        let source = array![[BLACK, WHITE], [WHITE, BLACK]];
        let extractor = TileExtractor::extract(&source, 1).unwrap();
        let ids = extractor.tile_ids();

        assert_eq!(ids[[0, 0]], ids[[1, 1]]);
        assert_eq!(ids[[0, 1]], ids[[1, 0]]);
        assert_ne!(ids[[0, 0]], ids[[0, 1]]);

        let frequency = extractor.frequency_model();
        assert_eq!(frequency.len(), 2);
        assert_eq!(frequency.weight(ids[[0, 0]]), Some(2));
        assert_eq!(frequency.total(), 4);

        assert_eq!(extractor.catalog().color(ids[[0, 0]]), Some(BLACK));
        assert_eq!(extractor.catalog().color(ids[[0, 1]]), Some(WHITE));
    }

    // Tests blocks wrap around the source borders
    // Verified by clamping block reads at the border
    #[test]
    fn test_blocks_wrap() {
        let source = array![[BLACK, WHITE], [WHITE, BLACK]];
        let extractor = TileExtractor::extract(&source, 2).unwrap();
        let ids = extractor.tile_ids();

        assert_eq!(extractor.tile_size(), 2);
        assert_eq!(ids[[0, 0]], ids[[1, 1]]);
        assert_ne!(ids[[0, 0]], ids[[0, 1]]);
        assert_eq!(extractor.frequency_model().len(), 2);
    }

    // Tests each edge records the tile at p as lying at d of its neighbour
    // Verified by adding edges from p to its neighbours instead
    #[test]
    fn test_adjacency_directions() {
        let source = array![[RED, RED], [GREEN, GREEN]];
        let extractor = TileExtractor::extract(&source, 1).unwrap();
        let red = extractor.tile_ids()[[0, 0]];
        let green = extractor.tile_ids()[[1, 0]];
        let adjacency = extractor.adjacency_model().unwrap();

        let only = |tile: TileId| -> BTreeSet<TileId> { std::iter::once(tile).collect() };
        assert_eq!(adjacency.query(red, Direction::East).unwrap(), &only(red));
        assert_eq!(adjacency.query(red, Direction::West).unwrap(), &only(red));
        assert_eq!(adjacency.query(red, Direction::South).unwrap(), &only(green));
        assert_eq!(adjacency.query(green, Direction::North).unwrap(), &only(red));
        assert_eq!(adjacency.edge_count(), 8);
    }

    // Tests a uniform source yields one tile bordering itself everywhere
    // Verified by skipping self-loops
    #[test]
    fn test_uniform_source() {
        let source = Array2::from_elem((3, 3), RED);
        let extractor = TileExtractor::extract(&source, 2).unwrap();
        let rules = extractor.rules().unwrap();

        assert_eq!(rules.tile_count(), 1);
        assert_eq!(rules.weight(0), 9);
        for direction in Direction::ALL {
            assert!(rules.allowed(0, direction).unwrap().contains(0));
        }
    }

    // Tests invalid extraction parameters
    // Verified by removing the tile size check
    #[test]
    fn test_extract_rejects_bad_input() {
        let source = Array2::from_elem((2, 2), RED);
        assert!(TileExtractor::extract(&source, 0).is_err());

        let empty = Array2::<[u8; 4]>::from_elem((0, 0), RED);
        assert!(TileExtractor::extract(&empty, 1).is_err());
    }

    // Tests catalog keeps the first colour and averages channels
    // Verified by overwriting colours on insert
    #[test]
    fn test_catalog() {
        let mut catalog = TileCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.average_color(), [128, 128, 128, 255]);

        catalog.insert(TileId(1), BLACK);
        catalog.insert(TileId(1), WHITE);
        catalog.insert(TileId(2), WHITE);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.color(TileId(1)), Some(BLACK));
        assert_eq!(catalog.color(TileId(3)), None);
        assert_eq!(catalog.average_color(), [127, 127, 127, 255]);
    }

    // Tests integer channel means
    // Verified by rounding instead of truncating
    #[test]
    fn test_average_color() {
        assert_eq!(average_color([RED, GREEN]), [127, 127, 0, 255]);
        assert_eq!(average_color([[10, 20, 30, 40]]), [10, 20, 30, 40]);
        assert_eq!(TileId(255).to_string(), "00000000000000ff");
    }
}
