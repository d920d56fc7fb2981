//! `anitrend-aggregate`: plot title and genre totals across every snapshot.

use anitrend_cli::AggregatePipeline;
use anitrend_common::{init_default_logging, init_logging, SystemClock};
use anitrend_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            let _ = init_default_logging();
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    init_logging(config.logging.logging_config())?;

    let plot_dir = config.paths.aggregated_plots_dir();
    let report = AggregatePipeline::new(config).run(&SystemClock)?;

    if report.charts.is_empty() {
        info!("No plots written");
    } else {
        info!(dir = %plot_dir.display(), charts = report.charts.len(), "Plots saved");
    }
    Ok(())
}
