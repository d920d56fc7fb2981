//! Fetch and aggregate pipelines.

use crate::error::CliResult;
use anitrend_common::{
    format_run_timestamp, process_payload, Clock, ProcessedRun, SnapshotWriter, TrendingSource,
    WrittenSnapshot,
};
use anitrend_config::Config;
use anitrend_graphs::{
    plot_anime_frequency, plot_genre_distribution, plot_genre_frequency, plot_trending_scores,
    AggregateCounts, SnapshotAggregator,
};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// Outcome of one fetch run
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Timestamp stamped on every file of the run
    pub timestamp: String,
    /// Scored anime kept from the payload
    pub anime_count: usize,
    /// Genre occurrences kept from the payload
    pub genre_count: usize,
    /// Snapshot files written
    pub snapshot: WrittenSnapshot,
    /// Charts written
    pub charts: Vec<PathBuf>,
}

/// Fetches the trending page, snapshots it and plots it
pub struct FetchPipeline<S> {
    source: S,
    config: Config,
}

impl<S: TrendingSource> FetchPipeline<S> {
    /// Pipeline reading from `source`
    pub const fn new(source: S, config: Config) -> Self {
        Self { source, config }
    }

    /// Fetch and process. A failed request is logged and yields an empty run.
    #[instrument(skip(self))]
    pub async fn collect(&self) -> ProcessedRun {
        let payload = match self.source.fetch_trending().await {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to fetch trending anime");
                None
            }
        };
        process_payload(payload.as_ref())
    }

    /// Write the run's snapshot files
    pub fn persist(&self, run: &ProcessedRun, timestamp: &str) -> CliResult<WrittenSnapshot> {
        let writer = SnapshotWriter::new(self.config.paths.raw_data_dir(), self.config.snapshot.format);
        Ok(writer.write_run(run, timestamp)?)
    }

    /// Plot the run's score and genre charts
    pub fn plot(&self, run: &ProcessedRun, timestamp: &str) -> CliResult<Vec<PathBuf>> {
        if !self.config.charts.enabled {
            info!("Charts disabled, skipping plots");
            return Ok(Vec::new());
        }

        let settings = &self.config.charts;
        let plots_dir = self.config.paths.plots_dir();
        let charts = [
            plot_trending_scores(run, settings, &plots_dir, timestamp)?,
            plot_genre_distribution(run, settings, &plots_dir, timestamp)?,
        ];
        Ok(charts.into_iter().flatten().collect())
    }

    /// One complete fetch run
    #[instrument(skip(self, clock))]
    pub async fn run(&self, clock: &dyn Clock) -> CliResult<FetchReport> {
        let timestamp = format_run_timestamp(clock.now());

        fs::create_dir_all(self.config.paths.raw_data_dir())?;
        if self.config.charts.enabled {
            fs::create_dir_all(self.config.paths.plots_dir())?;
        }

        let run = self.collect().await;
        let snapshot = self.persist(&run, &timestamp)?;
        let charts = if run.animes.is_empty() {
            Vec::new()
        } else {
            self.plot(&run, &timestamp)?
        };

        info!(
            %timestamp,
            animes = run.animes.len(),
            genres = run.genres.len(),
            charts = charts.len(),
            "Fetch run complete"
        );

        Ok(FetchReport {
            timestamp,
            anime_count: run.animes.len(),
            genre_count: run.genres.len(),
            snapshot,
            charts,
        })
    }
}

/// Outcome of one aggregate run
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    /// Timestamp stamped on the charts
    pub timestamp: String,
    /// Counts gathered from the snapshots
    pub counts: AggregateCounts,
    /// Charts written
    pub charts: Vec<PathBuf>,
}

/// Tallies every snapshot and plots the totals
pub struct AggregatePipeline {
    config: Config,
}

impl AggregatePipeline {
    /// Pipeline over the configured raw data directory
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// One complete aggregate run
    #[instrument(skip(self, clock))]
    pub fn run(&self, clock: &dyn Clock) -> CliResult<AggregateReport> {
        let timestamp = format_run_timestamp(clock.now());
        let counts = SnapshotAggregator::new(self.config.paths.raw_data_dir()).aggregate()?;

        info!(
            files = counts.files_read,
            distinct_titles = counts.titles.len(),
            title_occurrences = counts.anime_counts.total(),
            genre_occurrences = counts.genre_counts.total(),
            skipped_lines = counts.lines_skipped,
            "Snapshot summary"
        );

        if counts.is_empty() {
            info!("No snapshot data found, nothing to plot");
            return Ok(AggregateReport {
                timestamp,
                counts,
                charts: Vec::new(),
            });
        }

        let charts = if self.config.charts.enabled {
            let settings = &self.config.charts;
            let dir = self.config.paths.aggregated_plots_dir();
            let charts = [
                plot_genre_frequency(&counts.genre_counts, settings, &dir, &timestamp)?,
                plot_anime_frequency(&counts.anime_counts, settings, &dir, &timestamp)?,
            ];
            charts.into_iter().flatten().collect()
        } else {
            info!("Charts disabled, skipping plots");
            Vec::new()
        };

        Ok(AggregateReport {
            timestamp,
            counts,
            charts,
        })
    }
}
