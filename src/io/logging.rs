//! Diagnostic logging to stderr
//!
//! Progress bars own the terminal during generation, so log output is kept
//! quiet by default. Restarts are reported at `debug`, finished files at
//! `info`. `RUST_LOG` overrides the chosen level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::io::error::{Result, computation_error};

/// Default filter directive when `RUST_LOG` is unset
pub const fn default_directive(quiet: bool) -> &'static str {
    if quiet { "error" } else { "warn" }
}

/// Filter from `RUST_LOG`, falling back to `directive`
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Install the global subscriber writing to stderr
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_logging(quiet: bool) -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(default_directive(quiet)))
        .with(stderr_layer)
        .try_init()
        .map_err(|e| computation_error("init_logging", &e))
}
