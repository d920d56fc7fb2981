//! Integration tests for the fetch and aggregate pipelines.
//!
//! Most tests disable charts to keep them fast; one run renders everything.

use anitrend_cli::{AggregatePipeline, FetchPipeline};
use anitrend_common::test_utils::{
    create_temp_dir, fixed_clock, init_test_logging, payload_fixtures,
};
use anitrend_common::{AnitrendError, FixedClock, SnapshotFormat, TrendingSource};
use anitrend_config::Config;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::fs;
use std::path::Path;

struct StubSource(Option<Value>);

#[async_trait]
impl TrendingSource for StubSource {
    async fn fetch_trending(&self) -> anitrend_common::Result<Option<Value>> {
        Ok(self.0.clone())
    }
}

struct FailingSource;

#[async_trait]
impl TrendingSource for FailingSource {
    async fn fetch_trending(&self) -> anitrend_common::Result<Option<Value>> {
        Err(AnitrendError::network_with_source(
            "Connection failed",
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
        ))
    }
}

fn test_config(root: &Path, format: SnapshotFormat) -> Config {
    let mut config = Config::default();
    config.paths.raw_data_dir = root.join("raw-data").display().to_string();
    config.paths.plots_dir = root.join("plots").display().to_string();
    config.paths.aggregated_plots_dir = root.join("aggregated-plots").display().to_string();
    config.snapshot.format = format;
    config.charts.enabled = false;
    config
}

fn clock_at(day: u32) -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    )
}

#[tokio::test]
async fn test_fetch_skips_unscored_entries() {
    init_test_logging();
    let dir = create_temp_dir();
    let config = test_config(dir.path(), SnapshotFormat::Text);

    let pipeline = FetchPipeline::new(StubSource(Some(payload_fixtures::scenario_payload())), config);
    let report = pipeline.run(&fixed_clock()).await.unwrap();

    assert_eq!(report.timestamp, "02-01-2025T03h04m05s");
    assert_eq!(report.anime_count, 1);
    assert_eq!(report.genre_count, 1);
    assert!(report.charts.is_empty());

    let animes = fs::read_to_string(report.snapshot.animes.unwrap()).unwrap();
    let genres = fs::read_to_string(report.snapshot.genres.unwrap()).unwrap();
    assert_eq!(animes, "A (Action) 80\n");
    assert_eq!(genres, "Action\n");
}

#[tokio::test]
async fn test_failed_fetch_writes_nothing() {
    let dir = create_temp_dir();
    let config = test_config(dir.path(), SnapshotFormat::JsonLines);
    let raw = config.paths.raw_data_dir();

    let report = FetchPipeline::new(FailingSource, config)
        .run(&fixed_clock())
        .await
        .unwrap();

    assert_eq!(report.anime_count, 0);
    assert!(report.snapshot.animes.is_none());
    assert!(report.snapshot.genres.is_none());
    assert_eq!(fs::read_dir(raw).unwrap().count(), 0);
}

#[tokio::test]
async fn test_non_success_response_writes_nothing() {
    let dir = create_temp_dir();
    let config = test_config(dir.path(), SnapshotFormat::JsonLines);
    let raw = config.paths.raw_data_dir();

    let report = FetchPipeline::new(StubSource(None), config)
        .run(&fixed_clock())
        .await
        .unwrap();

    assert_eq!(report.genre_count, 0);
    assert_eq!(fs::read_dir(raw).unwrap().count(), 0);
}

#[tokio::test]
async fn test_fetch_then_aggregate() {
    let dir = create_temp_dir();
    let config = test_config(dir.path(), SnapshotFormat::JsonLines);

    let pipeline =
        FetchPipeline::new(StubSource(Some(payload_fixtures::trending_page())), config.clone());
    pipeline.run(&clock_at(1)).await.unwrap();
    pipeline.run(&clock_at(2)).await.unwrap();

    let report = AggregatePipeline::new(config).run(&clock_at(3)).unwrap();

    assert_eq!(report.timestamp, "03-01-2025T12h00m00s");
    assert_eq!(report.counts.files_read, 4);
    assert_eq!(report.counts.titles.len(), 9);
    assert_eq!(report.counts.anime_counts.get("Sousou no Frieren"), 2);
    assert_eq!(report.counts.anime_counts.get("Chainsaw Man"), 2);
    assert_eq!(report.counts.genre_counts.get("Sci-Fi"), 4);
    assert!(report.charts.is_empty());
}

#[test]
fn test_aggregate_over_missing_directory() {
    let dir = create_temp_dir();
    let config = test_config(dir.path(), SnapshotFormat::JsonLines);

    let report = AggregatePipeline::new(config).run(&fixed_clock()).unwrap();

    assert!(report.counts.is_empty());
    assert!(report.charts.is_empty());
    assert!(!dir.path().join("aggregated-plots").exists());
}

#[tokio::test]
async fn test_fetch_and_aggregate_render_charts() {
    let dir = create_temp_dir();
    let mut config = test_config(dir.path(), SnapshotFormat::JsonLines);
    config.charts.enabled = true;

    let fetch = FetchPipeline::new(StubSource(Some(payload_fixtures::trending_page())), config.clone())
        .run(&clock_at(1))
        .await
        .unwrap();

    let plots = dir.path().join("plots");
    assert_eq!(
        fetch.charts,
        vec![
            plots.join("anime-01-01-2025T12h00m00s.png"),
            plots.join("genre-01-01-2025T12h00m00s.png"),
        ]
    );

    let aggregate = AggregatePipeline::new(config).run(&clock_at(2)).unwrap();
    let aggregated = dir.path().join("aggregated-plots");
    assert_eq!(
        aggregate.charts,
        vec![
            aggregated.join("genre_frequency-02-01-2025T12h00m00s.png"),
            aggregated.join("anime_frequency-02-01-2025T12h00m00s.png"),
        ]
    );

    for chart in fetch.charts.iter().chain(&aggregate.charts) {
        assert!(fs::metadata(chart).unwrap().len() > 0);
    }
}
