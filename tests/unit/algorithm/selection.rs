//! Tests for seeded random sampling

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wavetile::algorithm::selection::{RandomSelector, TileSampler};

    // Tests identical seeds produce identical decisions
    // Verified by seeding from entropy
    #[test]
    fn test_deterministic_sequence() {
        let mut a = RandomSelector::new(7);
        let mut b = RandomSelector::from_rng(StdRng::seed_from_u64(7));
        let weights = [1.0, 2.0, 3.0, 4.0];

        for _ in 0..50 {
            assert_eq!(a.choose_weighted(&weights), b.choose_weighted(&weights));
            assert_eq!(a.choose_position(9, 4), b.choose_position(9, 4));
        }
    }

    // Tests zero weights are never chosen
    // Verified by ignoring weights in the draw
    #[test]
    fn test_zero_weights_never_chosen() {
        let mut selector = RandomSelector::new(3);
        for _ in 0..200 {
            assert_eq!(selector.choose_weighted(&[0.0, 5.0, 0.0]), 1);
        }
    }

    // Tests positions stay inside the grid in [row, col] order
    // Verified by swapping width and height
    #[test]
    fn test_position_in_bounds() {
        let mut selector = RandomSelector::new(11);
        for _ in 0..200 {
            let [row, col] = selector.choose_position(7, 2);
            assert!(row < 2);
            assert!(col < 7);
        }
    }

    // Tests draws roughly follow the weights
    // Verified by drawing uniformly
    #[test]
    fn test_weighted_distribution() {
        let mut selector = RandomSelector::new(42);
        let mut counts = [0usize; 2];
        for _ in 0..4000 {
            counts[selector.choose_weighted(&[1.0, 3.0])] += 1;
        }
        assert!(counts[1] > counts[0] * 2);
    }
}
