//! Application configuration structures

use anitrend_common::{AniListConfig, LoggingConfig, SnapshotFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// AniList endpoint settings
    #[validate]
    pub anilist: AniListSettings,

    /// Output directories
    #[validate]
    pub paths: PathsSettings,

    /// Snapshot encoding
    pub snapshot: SnapshotSettings,

    /// Chart rendering settings
    #[validate]
    pub charts: ChartSettings,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// AniList API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AniListSettings {
    /// GraphQL endpoint URL
    #[validate(url(message = "AniList endpoint must be a valid URL"))]
    pub endpoint: String,

    /// Number of trending entries requested per run
    #[validate(range(min = 1, max = 50, message = "per_page must be between 1 and 50"))]
    pub per_page: u32,

    /// Request timeout in seconds; no timeout when unset
    #[validate(range(min = 1, max = 600, message = "Timeout must be between 1 and 600 seconds"))]
    pub timeout_seconds: Option<u64>,
}

impl AniListSettings {
    /// Client configuration for these settings.
    pub fn client_config(&self) -> AniListConfig {
        let config = AniListConfig::new(self.endpoint.clone()).with_per_page(self.per_page);
        match self.timeout_seconds {
            Some(secs) => config.with_timeout(secs),
            None => config,
        }
    }
}

/// Directory layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PathsSettings {
    /// Where run snapshots are written and aggregated from
    #[validate(custom(
        function = "crate::validation::validate_path",
        message = "raw_data_dir must be a non-empty path without <>\"|?*"
    ))]
    pub raw_data_dir: String,

    /// Where per-run charts are written
    #[validate(custom(
        function = "crate::validation::validate_path",
        message = "plots_dir must be a non-empty path without <>\"|?*"
    ))]
    pub plots_dir: String,

    /// Where aggregate charts are written
    #[validate(custom(
        function = "crate::validation::validate_path",
        message = "aggregated_plots_dir must be a non-empty path without <>\"|?*"
    ))]
    pub aggregated_plots_dir: String,
}

impl PathsSettings {
    /// Raw data directory as a path
    pub fn raw_data_dir(&self) -> PathBuf {
        PathBuf::from(&self.raw_data_dir)
    }

    /// Per-run plots directory as a path
    pub fn plots_dir(&self) -> PathBuf {
        PathBuf::from(&self.plots_dir)
    }

    /// Aggregate plots directory as a path
    pub fn aggregated_plots_dir(&self) -> PathBuf {
        PathBuf::from(&self.aggregated_plots_dir)
    }
}

/// Snapshot file settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    /// Encoding of the anime snapshot file
    pub format: SnapshotFormat,
}

/// Chart rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartSettings {
    /// Whether the fetch and aggregate runs render charts at all
    pub enabled: bool,

    /// Category labels are word-wrapped at this many characters
    #[validate(range(min = 8, max = 200, message = "label_wrap_width must be between 8 and 200"))]
    pub label_wrap_width: usize,

    /// Font family for all text
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Bar color of the per-run score chart
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Score color must be valid hex color"))]
    pub score_color: String,

    /// Bar color of the per-run genre chart
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Genre color must be valid hex color"))]
    pub genre_color: String,

    /// Bar color of the aggregate genre chart
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Genre frequency color must be valid hex color"))]
    pub genre_frequency_color: String,

    /// Bar color of the aggregate anime chart
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Anime frequency color must be valid hex color"))]
    pub anime_frequency_color: String,

    /// Score chart width in pixels
    #[validate(range(min = 100, max = 8000, message = "Width must be between 100 and 8000 pixels"))]
    pub run_width: u32,

    /// Score chart height in pixels
    #[validate(range(min = 100, max = 8000, message = "Height must be between 100 and 8000 pixels"))]
    pub run_height: u32,

    /// Width of the genre and aggregate charts in pixels
    #[validate(range(min = 100, max = 8000, message = "Width must be between 100 and 8000 pixels"))]
    pub aggregate_width: u32,

    /// Height of the genre and aggregate charts in pixels
    #[validate(range(min = 100, max = 8000, message = "Height must be between 100 and 8000 pixels"))]
    pub aggregate_height: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Emit JSON lines instead of human readable output
    pub json: bool,

    /// Optional log file path
    #[validate(custom(function = "crate::validation::validate_path", message = "Invalid log file path"))]
    pub file_path: Option<String>,
}

impl LoggingSettings {
    /// Logging bootstrap configuration for these settings.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.to_ascii_lowercase(),
            json_format: self.json,
            file_path: self.file_path.clone(),
            ..LoggingConfig::default()
        }
    }
}
