//! Input/output: command line, rendering, visualisation and error types

/// Command-line arguments and batch file processing
pub mod cli;
/// Compile-time defaults
pub mod configuration;
/// Error type shared by the whole crate
pub mod error;
/// PNG export of finished grids
pub mod image;
/// Subscriber setup for diagnostic logging
pub mod logging;
/// Terminal progress bars
pub mod progress;
/// Per-step grid snapshots
pub mod visualization;
