//! Chart productions for a single run and for the aggregate.
//!
//! Each function returns `Ok(None)` when there is nothing to plot, and the path
//! of the written PNG otherwise.

use crate::{FrequencyTable, GraphConfig, GraphRenderer, HorizontalBarChart, StyleConfig};
use anitrend_common::{ProcessedRun, Result};
use anitrend_config::ChartSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const TRENDING_SCORES_TITLE: &str = "Top 10 Trending Anime with Average Scores";
const GENRE_DISTRIBUTION_TITLE: &str = "Genre Distribution in Top 10 Trending Anime";
const GENRE_FREQUENCY_TITLE: &str = "Total Frequency of All Genres";
const ANIME_FREQUENCY_TITLE: &str = "Frequency of Anime in the Top 10";

fn style_for(settings: &ChartSettings, bar_color: &str) -> StyleConfig {
    StyleConfig {
        bar_color: bar_color.to_string(),
        background_color: Some(settings.background_color.clone()),
        ..StyleConfig::default()
    }
    .with_font_family(&settings.font_family)
}

fn render_bars(
    chart: &HorizontalBarChart,
    config: &GraphConfig,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    chart.render_to_file(config, &path)?;
    info!(
        path = %path.display(),
        renderer = chart.name(),
        bars = chart.len(),
        "Saved chart"
    );
    Ok(path)
}

/// Score per anime in trending order → `<plots_dir>/anime-<timestamp>.png`
pub fn plot_trending_scores(
    run: &ProcessedRun,
    settings: &ChartSettings,
    plots_dir: &Path,
    timestamp: &str,
) -> Result<Option<PathBuf>> {
    if run.animes.is_empty() {
        info!("No data to visualize.");
        return Ok(None);
    }

    let chart = HorizontalBarChart::from_pairs(run.labelled_scores(), settings.label_wrap_width);
    let config = GraphConfig::new(TRENDING_SCORES_TITLE, settings.run_width, settings.run_height)
        .with_labels("Average Score", "Anime (Genres)")
        .with_style(style_for(settings, &settings.score_color));

    render_bars(&chart, &config, plots_dir, &format!("anime-{timestamp}.png")).map(Some)
}

/// Genre counts of one run, most frequent first → `<plots_dir>/genre-<timestamp>.png`
pub fn plot_genre_distribution(
    run: &ProcessedRun,
    settings: &ChartSettings,
    plots_dir: &Path,
    timestamp: &str,
) -> Result<Option<PathBuf>> {
    if run.genres.is_empty() {
        info!("No genres to visualize.");
        return Ok(None);
    }

    let table: FrequencyTable = run.genres.iter().map(String::as_str).collect();
    let chart = HorizontalBarChart::from_pairs(table.sorted_desc(), settings.label_wrap_width);
    let config = GraphConfig::new(
        GENRE_DISTRIBUTION_TITLE,
        settings.aggregate_width,
        settings.aggregate_height,
    )
    .with_labels("Frequency", "Genre")
    .with_style(style_for(settings, &settings.genre_color));

    render_bars(&chart, &config, plots_dir, &format!("genre-{timestamp}.png")).map(Some)
}

/// Genre totals across all snapshots → `<dir>/genre_frequency-<timestamp>.png`
pub fn plot_genre_frequency(
    genre_counts: &FrequencyTable,
    settings: &ChartSettings,
    dir: &Path,
    timestamp: &str,
) -> Result<Option<PathBuf>> {
    if genre_counts.is_empty() {
        info!("No genre counts to plot");
        return Ok(None);
    }

    let chart =
        HorizontalBarChart::from_pairs(genre_counts.sorted_desc(), settings.label_wrap_width);
    let config = GraphConfig::new(
        GENRE_FREQUENCY_TITLE,
        settings.aggregate_width,
        settings.aggregate_height,
    )
    .with_labels("Frequency", "Genre")
    .with_style(style_for(settings, &settings.genre_frequency_color));

    render_bars(&chart, &config, dir, &format!("genre_frequency-{timestamp}.png")).map(Some)
}

/// Runs each title appeared in → `<dir>/anime_frequency-<timestamp>.png`
pub fn plot_anime_frequency(
    anime_counts: &FrequencyTable,
    settings: &ChartSettings,
    dir: &Path,
    timestamp: &str,
) -> Result<Option<PathBuf>> {
    if anime_counts.is_empty() {
        info!("No anime counts to plot");
        return Ok(None);
    }

    let chart =
        HorizontalBarChart::from_pairs(anime_counts.sorted_desc(), settings.label_wrap_width);
    let config = GraphConfig::new(
        ANIME_FREQUENCY_TITLE,
        settings.aggregate_width,
        settings.aggregate_height,
    )
    .with_labels("Frequency", "Anime Title")
    .with_style(style_for(settings, &settings.anime_frequency_color));

    render_bars(&chart, &config, dir, &format!("anime_frequency-{timestamp}.png")).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anitrend_common::process_payload;
    use anitrend_common::test_utils::payload_fixtures;
    use tempfile::tempdir;

    fn assert_png(path: &Path, expected_name: &str) {
        assert_eq!(path.file_name().unwrap(), expected_name);
        let bytes = fs::read(path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_style_uses_settings() {
        let settings = ChartSettings {
            font_family: "DejaVu Sans".to_string(),
            ..ChartSettings::default()
        };
        let style = style_for(&settings, &settings.score_color);

        assert_eq!(style.bar_color, "#FFC0CB");
        assert_eq!(style.background_color.as_deref(), Some("#FFFFFF"));
        assert_eq!(style.title_font.family, "DejaVu Sans");
        assert_eq!(style.label_font.family, "DejaVu Sans");
    }

    #[test]
    fn test_empty_inputs_are_skipped() {
        let dir = tempdir().unwrap();
        let settings = ChartSettings::default();
        let run = ProcessedRun::default();
        let empty = FrequencyTable::new();

        assert_eq!(plot_trending_scores(&run, &settings, dir.path(), "ts").unwrap(), None);
        assert_eq!(plot_genre_distribution(&run, &settings, dir.path(), "ts").unwrap(), None);
        assert_eq!(plot_genre_frequency(&empty, &settings, dir.path(), "ts").unwrap(), None);
        assert_eq!(plot_anime_frequency(&empty, &settings, dir.path(), "ts").unwrap(), None);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_trending_page_charts_are_written() {
        let dir = tempdir().unwrap();
        let plots = dir.path().join("plots");
        let settings = ChartSettings::default();
        let run = process_payload(Some(&payload_fixtures::trending_page()));

        let scores = plot_trending_scores(&run, &settings, &plots, "ts").unwrap().unwrap();
        assert_png(&scores, "anime-ts.png");

        let genres = plot_genre_distribution(&run, &settings, &plots, "ts").unwrap().unwrap();
        assert_png(&genres, "genre-ts.png");
        assert_eq!(scores.parent(), Some(plots.as_path()));
    }

    #[test]
    fn test_aggregate_charts_are_written() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("aggregated-plots");
        let settings = ChartSettings::default();
        let genres: FrequencyTable = ["Action", "Drama", "Action", "Sci-Fi"].into_iter().collect();
        let titles: FrequencyTable = ["Sousou no Frieren", "Dandadan", "Sousou no Frieren"]
            .into_iter()
            .collect();

        let genre_chart = plot_genre_frequency(&genres, &settings, &target, "ts")
            .unwrap()
            .unwrap();
        assert_png(&genre_chart, "genre_frequency-ts.png");

        let anime_chart = plot_anime_frequency(&titles, &settings, &target, "ts")
            .unwrap()
            .unwrap();
        assert_png(&anime_chart, "anime_frequency-ts.png");
    }
}
