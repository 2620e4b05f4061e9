//! Diagnostic output.
//!
//! Logs go to stderr so `render` and `replay` can keep stdout for their
//! own output. `KAL_LOG` takes any `tracing` filter directive and wins over
//! the configured level.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "KAL_LOG";
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the filter from `KAL_LOG`, falling back to `level`.
pub fn filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber. Calling this twice is harmless; the
/// second call keeps the first subscriber.
pub fn initialize(level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
