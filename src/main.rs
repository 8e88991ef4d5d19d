use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use campsite_info::api::CampsiteClient;
use campsite_info::app;
use campsite_info::cache::CacheStore;
use campsite_info::util::config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "campsite-info",
    version,
    about = "Campsite details and comments in the terminal"
)]
struct Cli {
    /// Id of the campsite to show
    campsite_id: u32,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Disable disk cache
    #[arg(long)]
    no_cache: bool,

    /// Clear cached data before starting
    #[arg(short, long)]
    refresh: bool,

    /// Enable debug logging to file
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let _guard = setup_logging(&config, cli.debug)?;

    info!(
        campsite_id = cli.campsite_id,
        base_url = %config.api.base_url,
        "campsite-info starting"
    );

    let client = CampsiteClient::new(&config.api.base_url, config.api.timeout())
        .context("Failed to set up backend client")?;

    let cache_store = if cli.no_cache {
        None
    } else {
        let store = CacheStore::new(config.cache_dir(), config.cache.ttl_secs);
        if cli.refresh {
            store.clear()?;
        }
        Some(store)
    };

    app::event_loop::run(config, client, cli.campsite_id, cache_store).await
}

fn setup_logging(
    config: &AppConfig,
    debug: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if !debug {
        return Ok(None);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "campsite-info.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("campsite_info=debug"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
