//! Graph rendering trait

use crate::GraphConfig;
use anitrend_common::Result;
use plotters::style::RGBColor;
use std::path::Path;

/// Trait for rendering graphs with different styling options
pub trait GraphRenderer {
    /// Render the graph as a PNG at `path`
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()>;

    /// Short renderer name used in log output
    fn name(&self) -> &'static str;

    /// Bar fill color from style config
    fn get_bar_color(&self, config: &GraphConfig) -> RGBColor {
        self.parse_color(&config.style.bar_color)
    }

    /// Parse a color string (hex format) to `RGBColor`
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map_or(RGBColor(255, 255, 255), |color| self.parse_color(color))
    }
}
