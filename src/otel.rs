//! Logging initialization and configuration
//!
//! Routing and chain execution report through `tracing` macros with
//! structured fields (`request_id`, `method`, `path`, `route`). This module
//! installs a subscriber that renders those events as JSON for production or
//! pretty-printed for development.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `WEBROUTE_LOG_LEVEL` | `info` | trace/debug/info/warn/error |
//! | `WEBROUTE_LOG_FORMAT` | `json` | json/pretty |
//! | `WEBROUTE_LOG_TARGET_FILTER` | unset | extra comma-separated directives, e.g. `webroute::router=debug` |
//! | `WEBROUTE_LOG_INCLUDE_LOCATION` | `false` | add file:line to each event |
//!
//! `RUST_LOG`, when set, takes precedence over `WEBROUTE_LOG_LEVEL`.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json, // Default to JSON
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Module filter (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location (dev only)
    pub include_location: bool,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("WEBROUTE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("WEBROUTE_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            target_filter: env::var("WEBROUTE_LOG_TARGET_FILTER").ok(),
            include_location: env::var("WEBROUTE_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Verbose pretty output for local runs and tests
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
            include_location: true,
        }
    }

    #[must_use]
    pub fn default_prod() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            target_filter: None,
            include_location: false,
        }
    }

    /// Level from `log_level`; unknown values fall back to INFO.
    #[must_use]
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',') {
                let filter = filter.trim();
                if filter.is_empty() {
                    continue;
                }
                match filter.parse() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {filter}"),
                }
            }
        }

        env_filter
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use webroute::otel::{init_logging, LogConfig};
///
/// init_logging(&LogConfig::from_env()).expect("Failed to initialize logging");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_span_list(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default_dev() {
        let config = LogConfig::default_dev();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.include_location);
    }

    #[test]
    fn test_log_config_default_prod() {
        let config = LogConfig::default_prod();
        assert_eq!(config.level(), Level::INFO);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.include_location);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Json); // Default
    }

    #[test]
    fn test_level_parse() {
        let mut config = LogConfig::default_prod();
        config.log_level = "WARN".to_string();
        assert_eq!(config.level(), Level::WARN);
        config.log_level = "verbose".to_string();
        assert_eq!(config.level(), Level::INFO);
    }
}
