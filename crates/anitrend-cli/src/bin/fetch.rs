//! `anitrend-fetch`: snapshot and plot the current AniList trending page.

use anitrend_cli::FetchPipeline;
use anitrend_common::{init_default_logging, init_logging, AniListClient, SystemClock};
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

    info!(endpoint = %config.anilist.endpoint, "Starting anitrend fetch");

    let client = AniListClient::new(config.anilist.client_config())?;
    let report = FetchPipeline::new(client, config).run(&SystemClock).await?;

    match &report.snapshot.animes {
        Some(path) => info!(path = %path.display(), "Snapshot saved"),
        None => info!("Nothing saved for this run"),
    }
    Ok(())
}
