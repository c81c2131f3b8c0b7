//! Entry point for the Relief operations API server.
//!
//! Loads service configuration and the static datasets, then serves the
//! REST API until the process is terminated. A missing config file is
//! not an error; every setting has a default. A missing or malformed
//! dataset is fatal, since the whole API reads from it.

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use relief_data::{load_store, ConfigError, ServiceConfig};
use relief_server::{start_server, AppState, ServerConfig};

/// Path of the optional YAML configuration file.
const CONFIG_PATH: &str = "relief-config.yaml";

/// Application entry point.
///
/// Initializes logging, loads configuration and datasets, then runs
/// the HTTP server indefinitely.
///
/// # Errors
///
/// Returns an error if dataset loading or the server fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = load_config();

    // Initialize structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!("relief-server starting");
    if let Some(err) = config_error {
        warn!(error = %err, "invalid config file, using defaults");
    }
    info!(
        host = config.server.host,
        port = config.server.port,
        data_dir = %config.data.dir.display(),
        "configuration loaded"
    );

    let store = load_store(&config.data.dir).context("failed to load datasets")?;
    info!(
        cities = store.cities.len(),
        hubs = store.hubs.len(),
        disasters = store.disasters.len(),
        allocations = store.allocations().len(),
        "datasets loaded"
    );

    let state = AppState::new(store);
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    start_server(&server_config, state)
        .await
        .context("server failed")?;

    Ok(())
}

/// Load `relief-config.yaml`, falling back to defaults when absent or
/// invalid. An invalid file is reported once logging is up.
fn load_config() -> (ServiceConfig, Option<ConfigError>) {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        let mut config = ServiceConfig::default();
        config.apply_env_overrides();
        return (config, None);
    }
    match ServiceConfig::from_file(path) {
        Ok(config) => (config, None),
        Err(err) => {
            let mut config = ServiceConfig::default();
            config.apply_env_overrides();
            (config, Some(err))
        }
    }
}
