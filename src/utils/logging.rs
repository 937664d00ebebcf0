//! Diagnostic logging to stderr.
//!
//! Stdout carries the rendered Markdown, so every diagnostic goes to stderr.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
