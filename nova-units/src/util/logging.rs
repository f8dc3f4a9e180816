//! Logging utilities for the units library

use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Crates whose events are enabled by the default filter
const LOG_TARGETS: [&str; 2] = ["nova_units", "nova_units_cli"];

/// Build the filter used when `RUST_LOG` is not set
pub fn default_filter(level: Level) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize logging to stderr
pub fn init_logging(log_level: Option<Level>) -> Result<(), String> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = log_level.unwrap_or(Level::INFO);
        EnvFilter::new(default_filter(level))
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set global default subscriber: {}", e))?;

    info!("Logging initialized to stderr");
    Ok(())
}
