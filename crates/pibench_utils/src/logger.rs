//! Logging setup.
//!
//! Everything goes to stderr: stdout belongs to the benchmark report and must
//! stay exactly two lines in the default configuration.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "PIBENCH_LOG";

/// Filter used when neither variable is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global `tracing` subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = resolve_filter(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_filter(primary: Option<String>, fallback: Option<String>) -> EnvFilter {
    primary
        .into_iter()
        .chain(fallback)
        .find_map(|directives| EnvFilter::try_new(directives.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
