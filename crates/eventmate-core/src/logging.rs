//! File logging.
//!
//! The terminal belongs to the TUI, so diagnostics go to a log file under
//! EVENTMATE_HOME. `RUST_LOG` replaces the configured filter when set.

use std::fs;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;

/// Builds the filter directive for the configured level.
///
/// Dependencies stay at `warn` so HTTP internals do not flood the file.
pub fn filter_directive(level: &str) -> String {
    format!("warn,eventmate={level},eventmate_core={level},eventmate_tui={level}")
}

/// Installs the global subscriber writing to `config.log_path()`.
///
/// Keep the returned guard alive for the whole process; dropping it flushes
/// and stops the background writer.
///
/// # Errors
/// Returns an error if the log directory cannot be created, the level is not
/// a valid directive, or a subscriber is already installed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let log_path = config.log_path();
    let dir = log_path
        .parent()
        .context("Log file path has no parent directory")?;
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let file_name = log_path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", log_path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder()
            .parse(filter_directive(&config.logging.level))
            .with_context(|| format!("Invalid log level: {}", config.logging.level))?,
    };

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_parses() {
        let directive = filter_directive("debug");
        assert!(directive.contains("eventmate_tui=debug"));
        assert!(EnvFilter::builder().parse(directive).is_ok());
    }

    #[test]
    fn test_bogus_level_fails_to_parse() {
        assert!(EnvFilter::builder().parse(filter_directive("verbose")).is_err());
    }
}
