//! Default values. These reproduce the behaviour of a run with no
//! configuration file at all.

use crate::settings::{AniListSettings, ChartSettings, LoggingSettings, PathsSettings};
use anitrend_common::{DEFAULT_ANILIST_ENDPOINT, DEFAULT_PER_PAGE};

/// Default snapshot directory
pub const DEFAULT_RAW_DATA_DIR: &str = "raw-data";
/// Default per-run chart directory
pub const DEFAULT_PLOTS_DIR: &str = "plots";
/// Default aggregate chart directory
pub const DEFAULT_AGGREGATED_PLOTS_DIR: &str = "aggregated-plots";
/// Default label wrap width in characters
pub const DEFAULT_LABEL_WRAP_WIDTH: usize = 40;

impl Default for AniListSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ANILIST_ENDPOINT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            timeout_seconds: None,
        }
    }
}

impl Default for PathsSettings {
    fn default() -> Self {
        Self {
            raw_data_dir: DEFAULT_RAW_DATA_DIR.to_string(),
            plots_dir: DEFAULT_PLOTS_DIR.to_string(),
            aggregated_plots_dir: DEFAULT_AGGREGATED_PLOTS_DIR.to_string(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            label_wrap_width: DEFAULT_LABEL_WRAP_WIDTH,
            font_family: "sans-serif".to_string(),
            background_color: "#FFFFFF".to_string(),
            score_color: "#FFC0CB".to_string(),
            genre_color: "#87CEEB".to_string(),
            genre_frequency_color: "#4682B4".to_string(),
            anime_frequency_color: "#DB7093".to_string(),
            // 14x8 and 12x6 inches at 100 dpi
            run_width: 1400,
            run_height: 800,
            aggregate_width: 1200,
            aggregate_height: 600,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_path: None,
        }
    }
}
