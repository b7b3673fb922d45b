//! Structured logging configuration.
//!
//! Logs go to stderr so that table and CSV output on stdout stays clean.
//! Records emitted by the library through the `log` facade are picked up by
//! the subscriber as well.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    tracing::debug!("Structured logging initialized");
}

/// Log a completed command with its duration
pub fn log_command(command: &str, duration_ms: u64, mutated: bool) {
    if duration_ms > 1000 {
        tracing::warn!(
            command = command,
            duration_ms = duration_ms,
            mutated = mutated,
            "PERFORMANCE: Slow command"
        );
    } else {
        tracing::debug!(
            command = command,
            duration_ms = duration_ms,
            mutated = mutated,
            "Command completed"
        );
    }
}
