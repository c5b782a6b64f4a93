//! Compass API Server
//!
//! Run with: cargo run --bin compass
//!
//! # Configuration
//!
//! Read from `config.toml` (see `compass-cli config`) with environment
//! overrides:
//! - `COMPASS_DATA_DIR`: Directory holding `objectives.json`
//! - `COMPASS_API_HOST` / `COMPASS_API_PORT`: Bind address (default: 127.0.0.1:8090)
//! - `COMPASS_PROJECTION`: Combined chart formula (`blended` or `product`)
//! - `COMPASS_LOG_LEVEL` / `COMPASS_LOG_FORMAT`: Logging (`pretty` or `json`)
//! - `RUST_LOG`: Full filter directive, overrides the level above

use compass::api::{serve, AppState, SharedRepository};
use compass::chart::SnapshotFactory;
use compass::config::{Config, LoggingConfig};
use compass::persistence::JsonFileRepository;
use compass::session::Session;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting Compass API server v{}", env!("CARGO_PKG_VERSION"));

    // A data directory that cannot be created is fatal
    let repository = JsonFileRepository::open(&config.storage.data_dir, &config.storage.file_name)
        .map_err(|e| {
            format!(
                "Cannot use data directory {:?}: {}",
                config.storage.data_dir, e
            )
        })?;
    tracing::info!("Objective file: {:?}", repository.path());

    let options = config.session_options();
    tracing::info!(projection = %options.projection, "Chart projection");

    let session = Session::open(
        Box::new(repository) as SharedRepository,
        SnapshotFactory::default(),
        options,
    );

    let state = AppState::new(session, config.api.clone(), config.csv.clone());
    serve(state, &config.api).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter_directive().into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
