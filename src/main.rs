use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_catalog_server::catalog_store::{CatalogStore, SqliteCatalogStore};
use music_catalog_server::config::{
    AppConfig, CliConfig, FileConfig, DEFAULT_METRICS_PORT, DEFAULT_PORT,
    DEFAULT_QUERY_TIMEOUT_SEC, DEFAULT_READ_POOL_SIZE,
};
use music_catalog_server::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};

#[derive(Parser, Debug)]
#[command(version, about = "REST server for a music catalog of artists, albums and songs")]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI and env.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite catalog database file, created if missing.
    #[clap(long, env = "CATALOG_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, env = "METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, env = "REQUESTS_LOGGING_LEVEL", default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Maximum seconds to wait for a single database call. 0 disables the limit.
    #[clap(long, env = "QUERY_TIMEOUT_SEC", default_value_t = DEFAULT_QUERY_TIMEOUT_SEC)]
    pub query_timeout_sec: u64,

    /// Number of read-only database connections.
    #[clap(long, env = "READ_POOL_SIZE", default_value_t = DEFAULT_READ_POOL_SIZE)]
    pub read_pool_size: usize,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            query_timeout_sec: self.query_timeout_sec,
            read_pool_size: self.read_pool_size,
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
        Err(err) => warn!("Could not listen for Ctrl+C: {}", err),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine, settings may come from the real environment.
    let dotenv_path = dotenvy::dotenv().ok();

    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {:?}", path);
    }

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Opening SQLite catalog database at {:?}...", app_config.db_path);
    let catalog_store = Arc::new(SqliteCatalogStore::new(
        &app_config.db_path,
        app_config.read_pool_size,
    )?);

    info!("Initializing metrics...");
    metrics::init_metrics();
    metrics::set_catalog_metrics(
        catalog_store.get_artists_count(),
        catalog_store.get_albums_count(),
        catalog_store.get_songs_count(),
    );

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level,
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        query_timeout: app_config.query_timeout,
    };

    run_server(catalog_store, server_config, shutdown_signal()).await
}
