//! checkin-gateway server entry point.
//!
//! Opens the configured store and starts the Axum HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use checkin_gateway::api;
use checkin_gateway::app_state::AppState;
use checkin_gateway::config::{GatewayConfig, StorageBackend};
use checkin_gateway::persistence::{CheckInStore, MemoryStore, PostgresStore, RosterStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        addr = %config.listen_addr,
        backend = %config.storage_backend,
        faculty_match = %config.faculty_match,
        "starting checkin-gateway"
    );

    // Build persistence layer
    let (rosters, check_ins): (Arc<dyn RosterStore>, Arc<dyn CheckInStore>) =
        match config.storage_backend {
            StorageBackend::Memory => {
                let store = match &config.seed_file {
                    Some(path) => MemoryStore::from_seed_file(path).await?,
                    None => MemoryStore::new(),
                };
                let store = Arc::new(store);
                (
                    Arc::clone(&store) as Arc<dyn RosterStore>,
                    store as Arc<dyn CheckInStore>,
                )
            }
            StorageBackend::Postgres => {
                let store = PostgresStore::connect(&config)
                    .await
                    .context("connecting to postgres")?;
                if config.run_migrations {
                    store.migrate().await.context("running migrations")?;
                }
                let store = Arc::new(store);
                (
                    Arc::clone(&store) as Arc<dyn RosterStore>,
                    store as Arc<dyn CheckInStore>,
                )
            }
        };

    // Build application
    let app_state = AppState::from_stores(rosters, check_ins, config.faculty_match);
    let app = api::build_app(app_state, Duration::from_secs(config.request_timeout_secs));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
