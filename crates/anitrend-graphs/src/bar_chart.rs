//! Horizontal bar chart with word-wrapped category labels

use crate::{GraphConfig, GraphRenderer};
use anitrend_common::{grapheme_count, wrap_label, AnitrendError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::debug;

/// Half of a bar's thickness in row units
const BAR_HALF_HEIGHT: f64 = 0.35;
/// Extra pixels between wrapped label lines
const LINE_SPACING: u32 = 4;
/// Vertical padding per bar row
const ROW_PADDING: u32 = 12;
/// Gap between a label's right edge and the y axis
const LABEL_GAP: u32 = 8;
/// Rough glyph width as a fraction of the font size
const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Plot area never gets narrower than this
const MIN_PLOT_WIDTH: u32 = 300;

/// One bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarItem {
    /// Category label, wrapped when drawn
    pub label: String,
    /// Bar length
    pub value: u32,
}

/// Pixel dimensions computed for a chart before drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    /// Image width
    pub width: u32,
    /// Image height, grown to fit every row
    pub height: u32,
    /// Width reserved left of the y axis for labels
    pub label_area: u32,
    /// Height of one label line
    pub line_height: u32,
}

/// Horizontal bar chart. Items are drawn in the order given with the first
/// item on top.
#[derive(Debug, Clone)]
pub struct HorizontalBarChart {
    items: Vec<BarItem>,
    wrap_width: usize,
}

impl HorizontalBarChart {
    /// Empty chart wrapping labels at `wrap_width` characters
    pub fn new(wrap_width: usize) -> Self {
        Self {
            items: Vec::new(),
            wrap_width,
        }
    }

    /// Chart over `(label, value)` pairs, in order
    pub fn from_pairs<I, S>(pairs: I, wrap_width: usize) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut chart = Self::new(wrap_width);
        for (label, value) in pairs {
            chart.push(label, value);
        }
        chart
    }

    /// Append a bar below the existing ones
    pub fn push(&mut self, label: impl Into<String>, value: u32) {
        self.items.push(BarItem {
            label: label.into(),
            value,
        });
    }

    /// Bars in drawing order
    pub fn items(&self) -> &[BarItem] {
        &self.items
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Each label split into display lines
    pub fn wrapped_labels(&self) -> Vec<Vec<String>> {
        self.items
            .iter()
            .map(|item| {
                let lines = wrap_label(&item.label, self.wrap_width);
                if lines.is_empty() {
                    vec![String::new()]
                } else {
                    lines
                }
            })
            .collect()
    }

    /// Upper bound of the value axis, with headroom for the value labels
    fn max_value(&self) -> f64 {
        let max = self.items.iter().map(|item| item.value).max().unwrap_or(0);
        (f64::from(max) * 1.1).max(1.0)
    }

    /// Compute image size and label area for `config`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn layout(&self, config: &GraphConfig) -> ChartLayout {
        let wrapped = self.wrapped_labels();
        let style = &config.style;
        let font_size = style.label_font.size;
        let line_height = font_size + LINE_SPACING;

        let max_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1) as u32;
        let rows = self.items.len() as u32 * (max_lines * line_height + ROW_PADDING);
        let chrome = style.margins.top * 2 + style.title_font.size * 2 + style.margins.bottom;
        let height = config.height.max(chrome + rows);

        let widest = wrapped
            .iter()
            .flatten()
            .map(|line| grapheme_count(line))
            .max()
            .unwrap_or(0);
        let text_width = (widest as f64 * f64::from(font_size) * CHAR_WIDTH_RATIO).ceil() as u32;
        let desc_width = if config.y_label.is_some() { font_size * 2 } else { 0 };
        let label_area = style.margins.left.max(text_width + desc_width + LABEL_GAP * 2);
        let width = config
            .width
            .max(label_area + style.margins.right + MIN_PLOT_WIDTH);

        ChartLayout {
            width,
            height,
            label_area,
            line_height,
        }
    }
}

/// Vertical center of row `i` out of `n`, first row topmost
#[allow(clippy::cast_precision_loss)]
fn row_center(n: usize, i: usize) -> f64 {
    (n - 1 - i) as f64
}

impl HorizontalBarChart {
    /// Draw onto `root`, which must be `layout.width` by `layout.height`
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn draw<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &GraphConfig,
        layout: &ChartLayout,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let wrapped = self.wrapped_labels();
        let n = self.items.len();
        let max_value = self.max_value();
        let style = &config.style;
        let font = (style.label_font.family.as_str(), style.label_font.size);

        root.fill(&self.get_background_color(config))?;

        let mut chart = ChartBuilder::on(root)
            .caption(
                &config.title,
                (style.title_font.family.as_str(), style.title_font.size),
            )
            .margin(style.margins.top)
            .margin_right(style.margins.right)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(layout.label_area)
            .build_cartesian_2d(0.0..max_value, -0.5..(n as f64 - 0.5))?;

        // Category labels are drawn separately so they can span several lines
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&|_| String::new())
            .x_label_formatter(&|v| format!("{v:.0}"))
            .x_desc(config.x_label.as_deref().unwrap_or(""))
            .y_desc(config.y_label.as_deref().unwrap_or(""))
            .label_style(font)
            .axis_desc_style(font)
            .draw()?;

        let color = self.get_bar_color(config);
        chart.draw_series(self.items.iter().enumerate().map(|(i, item)| {
            let y = row_center(n, i);
            Rectangle::new(
                [
                    (0.0, y - BAR_HALF_HEIGHT),
                    (f64::from(item.value), y + BAR_HALF_HEIGHT),
                ],
                color.filled(),
            )
        }))?;

        let value_style = font
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart.draw_series(self.items.iter().enumerate().map(|(i, item)| {
            Text::new(
                item.value.to_string(),
                (f64::from(item.value) + max_value * 0.01, row_center(n, i)),
                value_style.clone(),
            )
        }))?;

        let label_style = font
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        let line_height = layout.line_height as i32;
        for (i, lines) in wrapped.iter().enumerate() {
            let (axis_x, center_y) = chart.backend_coord(&(0.0, row_center(n, i)));
            let first = center_y - (lines.len() as i32 - 1) * line_height / 2;
            for (j, line) in lines.iter().enumerate() {
                root.draw(&Text::new(
                    line.as_str(),
                    (axis_x - LABEL_GAP as i32, first + j as i32 * line_height),
                    label_style.clone(),
                ))?;
            }
        }

        root.present()?;
        Ok(())
    }
}

impl GraphRenderer for HorizontalBarChart {
    fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.items.is_empty() {
            return Err(AnitrendError::graph("No data available for bar chart"));
        }

        let layout = self.layout(config);
        let root = BitMapBackend::new(path, (layout.width, layout.height)).into_drawing_area();
        self.draw(&root, config, &layout)?;

        debug!(path = %path.display(), bars = self.items.len(), "Rendered horizontal bar chart");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "horizontal_bar"
    }
}
