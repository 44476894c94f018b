//! Tracing subscriber setup.
//!
//! Log lines carry a UTC timestamp, level, and source `file:line`. They go
//! to stderr, or to an append-only log file when one is configured. The
//! filter comes from `VELLUM_LOG` when set, else `--verbose` (debug), else
//! the configured level.
//!
//! Passphrases, salts and key material are never logged.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::constants::ENV_LOG;

/// Pick the filter directive: `VELLUM_LOG`, then `--verbose`, then config.
fn filter_for(verbose: bool, configured_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { configured_level };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    })
}

/// Initialise the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber has
/// already been set.
pub fn init(verbose: bool, configured_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = filter_for(verbose, configured_level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                vellum_core::fs::mkdir_if_not_exists(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    anyhow::anyhow!("Failed to open log file {}: {}", path.display(), e)
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_selects_debug() {
        if std::env::var(ENV_LOG).is_ok() {
            return;
        }
        let filter = filter_for(true, "warn");
        assert_eq!(filter.to_string().to_lowercase(), "debug");
    }

    #[test]
    fn test_configured_level_used() {
        if std::env::var(ENV_LOG).is_ok() {
            return;
        }
        let filter = filter_for(false, "info");
        assert_eq!(filter.to_string().to_lowercase(), "info");
    }

    #[test]
    fn test_bad_level_falls_back() {
        if std::env::var(ENV_LOG).is_ok() {
            return;
        }
        let filter = filter_for(false, "vellum=loud");
        assert_eq!(filter.to_string().to_lowercase(), "warn");
    }
}
