//! Tests for per-file progress state and bar messages

#[cfg(test)]
mod tests {
    use std::path::Path;
    use wavetile::io::progress::{FileProgress, ProgressManager, progress_message};

    // Tests messages pad the resolved count and mention restarts
    // Verified by always printing the restart suffix
    #[test]
    fn test_progress_message() {
        let mut state = FileProgress {
            name: "a.png".to_string(),
            resolved: 12,
            total: 900,
            restarts: 0,
        };
        assert_eq!(progress_message(&state), " 12/900");

        state.restarts = 1;
        assert_eq!(progress_message(&state), " 12/900 (1 restart)");

        state.restarts = 3;
        assert_eq!(progress_message(&state), " 12/900 (3 restarts)");
    }

    // Tests state follows start, update and completion
    // Verified by not filling the bar on completion
    #[test]
    fn test_file_lifecycle() {
        let mut manager = ProgressManager::new();
        manager.initialize(2);
        assert_eq!(manager.file_count(), 2);

        manager.start_file(1, Path::new("dir/b.png"), 100);
        assert_eq!(manager.state(1).map(|s| s.name.as_str()), Some("b.png"));
        assert_eq!(manager.state(0), Some(&FileProgress::default()));

        manager.update_cells(1, 40, 2);
        assert_eq!(manager.state(1).map(|s| (s.resolved, s.restarts)), Some((40, 2)));

        manager.complete_file(1);
        let done = manager.state(1).unwrap();
        assert_eq!(done.name, "✓ b.png");
        assert_eq!(done.resolved, 100);
        manager.finish();
    }

    // Tests many files switch to the batch bar without losing state
    // Verified by creating one bar per file
    #[test]
    fn test_batch_mode() {
        let mut manager = ProgressManager::default();
        manager.initialize(20);
        for index in 0..20 {
            manager.start_file(index, Path::new("x.png"), 10);
            manager.complete_file(index);
        }
        assert!(manager.state(19).is_some());
        assert!(manager.state(20).is_none());
        manager.finish();
    }
}
