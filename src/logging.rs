//! Structured logging to stderr.
//!
//! Normalized trees and diagnostics go to stdout, so log output stays on
//! stderr. The level comes from `--log-level`, else the `RBCST_LOG`
//! environment variable, else `warn`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "RBCST_LOG";
pub const DEFAULT_LEVEL: &str = "warn";

/// Picks the filter: an explicit level wins over the environment.
pub fn filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    }
}

/// Installs the global subscriber. A subscriber that is already installed
/// (tests, embedding) is kept.
pub fn init_logger(no_color: bool, log_level: Option<&str>) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_color)
        .with_filter(filter(log_level));

    if let Err(e) = tracing_subscriber::registry().with(stderr_layer).try_init() {
        tracing::debug!(error = %e, "logger already installed");
    }
}
