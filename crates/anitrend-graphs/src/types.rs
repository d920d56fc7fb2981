//! Graph types and data structures

use serde::{Deserialize, Serialize};

/// Graph configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Caption drawn above the plot
    pub title: String,
    /// Minimum width in pixels
    pub width: u32,
    /// Minimum height in pixels; charts with many rows grow past it
    pub height: u32,
    /// Horizontal axis description
    pub x_label: Option<String>,
    /// Vertical axis description
    pub y_label: Option<String>,
    /// Colors, fonts and margins
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            width: 800,
            height: 600,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Configuration with `title` and default styling
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Set both axis descriptions
    #[must_use]
    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    /// Replace the style
    #[must_use]
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }
}

/// Font configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family name
    pub family: String,
    /// Size in pixels
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Space above the caption
    pub top: u32,
    /// Space right of the plot, leaves room for value labels
    pub right: u32,
    /// Height of the x label area
    pub bottom: u32,
    /// Minimum width of the y label area
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 40,
            bottom: 60,
            left: 120,
        }
    }
}

/// Comprehensive styling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Fill color of every bar (hex format)
    pub bar_color: String,
    /// Background color (hex format), white when unset
    pub background_color: Option<String>,
    /// Caption font
    pub title_font: FontConfig,
    /// Axis and category label font
    pub label_font: FontConfig,
    /// Plot margins
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            bar_color: "#4682B4".to_string(),
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 24,
            },
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}

impl StyleConfig {
    /// Use `family` for both caption and labels
    #[must_use]
    pub fn with_font_family(mut self, family: &str) -> Self {
        self.title_font.family = family.to_string();
        self.label_font.family = family.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_config_builder() {
        let config = GraphConfig::new("Scores", 1400, 800)
            .with_labels("Average Score", "Anime (Genres)")
            .with_style(StyleConfig::default().with_font_family("DejaVu Sans"));

        assert_eq!(config.title, "Scores");
        assert_eq!((config.width, config.height), (1400, 800));
        assert_eq!(config.x_label.as_deref(), Some("Average Score"));
        assert_eq!(config.y_label.as_deref(), Some("Anime (Genres)"));
        assert_eq!(config.style.title_font.family, "DejaVu Sans");
        assert_eq!(config.style.label_font.family, "DejaVu Sans");
        assert_eq!(config.style.title_font.size, 24);
    }

    #[test]
    fn test_style_serialization() {
        let style = StyleConfig {
            bar_color: "#87CEEB".to_string(),
            ..StyleConfig::default()
        };

        let json = serde_json::to_string(&style).unwrap();
        let back: StyleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, style);
    }
}
