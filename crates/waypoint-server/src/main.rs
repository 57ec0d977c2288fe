//! Waypoint server binary.
//!
//! Holds the single journey document in memory and exposes it over HTTP
//! and `WebSocket`.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `WAYPOINT_CONFIG` (default `waypoint-config.yaml`)
//! 3. Build the journey engine at its initial document
//! 4. Serve the observer API until Ctrl-C

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use waypoint_core::WaypointConfig;
use waypoint_observer::{AppState, ServerConfig};

use crate::error::ServerBinError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "waypoint-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the listener cannot
/// bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("waypoint-server starting");

    run().await?;
    Ok(())
}

async fn run() -> Result<(), ServerBinError> {
    let path = std::env::var("WAYPOINT_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = WaypointConfig::load_or_default(&path)?;
    info!(
        itinerary = ?config.journey.itinerary,
        delay_increment = config.journey.risk.delay_increment,
        critical_threshold = config.journey.risk.critical_threshold,
        subscriber_buffer = config.broadcast.subscriber_buffer,
        "Configuration loaded"
    );

    let state = Arc::new(AppState::from_config(&config));
    let server_config = ServerConfig::from(&config.server);

    waypoint_observer::start_server(&server_config, state, shutdown_signal()).await?;

    info!("waypoint-server stopped");
    Ok(())
}

/// Resolve on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
