// src/logging.rs

//! Logging setup for `execwrap` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `EXECWRAP_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`
//!
//! The wrapper runs inside other people's builds, so the default stays quiet
//! and everything goes to STDERR; stdout belongs to the wrapped tool.

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt;

use crate::cli::LogLevel;
use crate::types::Environment;

pub const LOG_ENV_VAR: &str = "EXECWRAP_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, env: &Environment) -> Result<()> {
    let level = effective_level(cli_level, env);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

fn effective_level(cli_level: Option<LogLevel>, env: &Environment) -> tracing::Level {
    match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => env
            .get(LOG_ENV_VAR)
            .and_then(|s| s.to_str())
            .and_then(parse_level_str)
            .unwrap_or(tracing::Level::WARN),
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_beats_environment() {
        let env: Environment = [(LOG_ENV_VAR, "trace")].into_iter().collect();
        assert_eq!(
            effective_level(Some(LogLevel::Error), &env),
            tracing::Level::ERROR
        );
        assert_eq!(effective_level(None, &env), tracing::Level::TRACE);
    }

    #[test]
    fn unknown_or_missing_level_defaults_to_warn() {
        let env: Environment = [(LOG_ENV_VAR, "loud")].into_iter().collect();
        assert_eq!(effective_level(None, &env), tracing::Level::WARN);
        assert_eq!(
            effective_level(None, &Environment::default()),
            tracing::Level::WARN
        );
    }
}
