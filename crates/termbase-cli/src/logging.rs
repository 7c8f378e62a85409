//! Logging setup.
//!
//! Events go to stderr and are appended, without ANSI styling, to the run
//! log file. `RUST_LOG` overrides the configured level when set.

use crate::error::{CliError, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the level filter, preferring `RUST_LOG` over `level`.
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level.trim().to_lowercase())
            .map_err(|e| CliError::Config(format!("Invalid log level '{}': {}", level, e))),
    }
}

/// Install the global subscriber.
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(level: &str, log_file: Option<&Path>, color: bool) -> Result<()> {
    let filter = env_filter(level)?;

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(color)
        .with_target(false);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    CliError::Config(format!("Cannot open log file {}: {}", path.display(), e))
                })?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_levels_parse() {
        for level in ["error", "warn", "INFO", "debug", " trace "] {
            assert!(env_filter(level).is_ok(), "level {} rejected", level);
        }
    }

    #[test]
    fn test_unwritable_log_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("run.log");

        let result = init("info", Some(&path), false);
        assert!(matches!(result, Err(CliError::Config(ref m)) if m.contains("log file")));
    }
}
