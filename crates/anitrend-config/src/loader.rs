//! Configuration loading utilities

use crate::Config;
use anitrend_common::{AnitrendError, Result as AnitrendResult};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "ANITREND_CONFIG_PATH";

/// Configuration files looked up in the working directory, in order
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["anitrend.yaml", "anitrend.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for AnitrendError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source(err.to_string(), err)
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParse {
        var: var.to_string(),
        source: e.into(),
    })
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration the way the binaries do: the file named by
    /// `ANITREND_CONFIG_PATH`, else `anitrend.yaml`/`anitrend.yml` in the working
    /// directory, else defaults; then environment overrides and validation.
    pub fn load() -> AnitrendResult<Config> {
        let path = Self::resolve_path(env::var(CONFIG_PATH_ENV).ok());
        Ok(Self::load_with(path.as_deref(), |var| env::var(var).ok())?)
    }

    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_with(Some(path.as_ref()), |var| env::var(var).ok())
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AnitrendResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Load from an optional file, taking overrides from `lookup` instead of
    /// the process environment.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration file");
                Self::from_yaml_str(&std::fs::read_to_string(path)?)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_overrides_from(&mut config, lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a YAML document. Missing sections and fields take their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Explicit path if given, else the first default file that exists.
    pub fn resolve_path(explicit: Option<String>) -> Option<PathBuf> {
        explicit.map(PathBuf::from).or_else(|| {
            DEFAULT_CONFIG_FILES
                .iter()
                .map(PathBuf::from)
                .find(|p| p.exists())
        })
    }

    /// Apply overrides read through `lookup`
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // AniList
        if let Some(endpoint) = lookup("ANITREND_ENDPOINT") {
            config.anilist.endpoint = endpoint;
        }

        if let Some(per_page) = lookup("ANITREND_PER_PAGE") {
            config.anilist.per_page = parse_var("ANITREND_PER_PAGE", &per_page)?;
        }

        if let Some(timeout) = lookup("ANITREND_TIMEOUT") {
            config.anilist.timeout_seconds = match timeout.trim() {
                "" | "none" => None,
                value => Some(parse_var("ANITREND_TIMEOUT", value)?),
            };
        }

        // Paths
        if let Some(dir) = lookup("ANITREND_RAW_DATA_DIR") {
            config.paths.raw_data_dir = dir;
        }

        if let Some(dir) = lookup("ANITREND_PLOTS_DIR") {
            config.paths.plots_dir = dir;
        }

        if let Some(dir) = lookup("ANITREND_AGGREGATED_PLOTS_DIR") {
            config.paths.aggregated_plots_dir = dir;
        }

        // Snapshot and charts
        if let Some(format) = lookup("ANITREND_SNAPSHOT_FORMAT") {
            config.snapshot.format = parse_var("ANITREND_SNAPSHOT_FORMAT", &format)?;
        }

        if let Some(enabled) = lookup("ANITREND_CHARTS_ENABLED") {
            config.charts.enabled = parse_var("ANITREND_CHARTS_ENABLED", &enabled)?;
        }

        // Logging
        if let Some(level) = lookup("ANITREND_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = lookup("ANITREND_LOG_JSON") {
            config.logging.json = parse_var("ANITREND_LOG_JSON", &json)?;
        }

        Ok(())
    }
}
