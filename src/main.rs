use std::sync::Arc;

use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use media_dl::{Config, MediaDownloader, Result, run_with_shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env()?;
    info!("Configuration loaded:");
    info!("  listen address: {}", config.server.bind_address());
    info!("  temp dir: {:?}", config.storage.temp_dir);
    info!(
        "  retention: sweep every {}s, delete files older than {}s",
        config.retention.sweep_interval_secs, config.retention.max_age_secs
    );

    let downloader = Arc::new(MediaDownloader::new(config).await?);

    downloader.start_retention_sweeper();
    let api_server = downloader.spawn_api_server();

    run_with_shutdown(downloader).await?;

    api_server.abort();
    Ok(())
}
