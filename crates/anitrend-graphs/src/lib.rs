//! # Anitrend Graphs
//!
//! Frequency counting over run snapshots and horizontal bar chart rendering.
//!
//! The per-run charts are drawn straight from a processed run; the aggregate
//! charts from the counts gathered by [`SnapshotAggregator`] across every
//! snapshot in the raw data directory.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod bar_chart;
pub mod charts;
pub mod frequency;
pub mod renderer;
pub mod types;

pub use aggregator::{
    parse_anime_line, AggregateCounts, ParsedAnimeLine, SnapshotAggregator, SnapshotKind,
};
pub use bar_chart::{BarItem, ChartLayout, HorizontalBarChart};
pub use charts::{
    plot_anime_frequency, plot_genre_distribution, plot_genre_frequency, plot_trending_scores,
};
pub use frequency::FrequencyTable;
pub use renderer::GraphRenderer;
pub use types::{FontConfig, GraphConfig, MarginConfig, StyleConfig};
