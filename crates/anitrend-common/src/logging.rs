//! Structured logging infrastructure for anitrend

use crate::error::{AnitrendError, Result};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "anitrend_common=trace")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output (appended to)
    pub file_path: Option<String>,
    /// Whether to include span open/close events in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn open_log_file(path: &str) -> Result<Mutex<std::fs::File>> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AnitrendError::config_with_source(format!("Cannot open log file {path}"), e))?;
        Ok(Mutex::new(file))
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// A `RUST_LOG` environment variable takes precedence over `config.level`.
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AnitrendError::config_with_source("Invalid log level filter", e))?;

    let span_events = config.span_events();
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(path) = &config.file_path {
            let writer = LoggingConfig::open_log_file(path)?;
            registry.with(layer.with_writer(writer)).try_init()
        } else {
            registry.with(layer).try_init()
        }
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(path) = &config.file_path {
            let writer = LoggingConfig::open_log_file(path)?;
            registry
                .with(layer.with_ansi(false).with_writer(writer))
                .try_init()
        } else {
            registry.with(layer).try_init()
        }
    } else {
        let layer = fmt::layer()
            .compact()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(path) = &config.file_path {
            let writer = LoggingConfig::open_log_file(path)?;
            registry
                .with(layer.with_ansi(false).with_writer(writer))
                .try_init()
        } else {
            registry.with(layer).try_init()
        }
    };

    installed.map_err(|e| AnitrendError::config_with_source("Logging already initialised", e))
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(LoggingConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(!config.pretty_format);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_span_events() {
        let mut config = LoggingConfig::default();
        assert_eq!(config.span_events(), FmtSpan::NONE);

        config.include_spans = true;
        assert_eq!(config.span_events(), FmtSpan::NEW | FmtSpan::CLOSE);
    }

    #[test]
    fn test_open_log_file_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("anitrend.log");
        let result = LoggingConfig::open_log_file(path.to_str().unwrap());
        assert!(matches!(result, Err(AnitrendError::Config { .. })));
    }
}
