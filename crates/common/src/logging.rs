//! Logging setup and configuration

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Accepted values for a default log level
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Setup tracing subscriber for the application
///
/// `RUST_LOG` takes precedence over `default_level`. Output goes to stderr so
/// that stdout only carries the inventory itself.
pub fn setup_logging(default_level: &str) -> crate::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| crate::Error::Config(format!("Invalid log filter: {}", e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| crate::Error::Logging(e.to_string()))?;

    Ok(())
}

/// Check that a level name is one of [`LOG_LEVELS`]
pub fn validate_log_level(level: &str) -> crate::Result<()> {
    if LOG_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(crate::Error::Config(format!(
            "Invalid log level '{}', must be one of: {}",
            level,
            LOG_LEVELS.join(", ")
        )))
    }
}
