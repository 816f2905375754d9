//! Tests for log filter selection and subscriber installation

#[cfg(test)]
mod tests {
    use wavetile::io::logging::{default_directive, init_logging};

    // Tests quiet runs only report errors
    // Verified by ignoring the quiet flag
    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "error");
    }

    // Tests the global subscriber can only be installed once
    // Verified by using init instead of try_init
    #[test]
    fn test_init_logging_once() {
        // Only this test installs a subscriber in the unit test binary
        assert!(init_logging(true).is_ok());
        assert!(init_logging(false).is_err());
    }
}
