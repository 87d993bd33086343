//! Civic Daemon - complaint lifecycle backend
//!
//! Holds the shared complaint/quote store and serves the dispatch engine
//! over HTTP to the role dashboards.

use anyhow::Result;
use tracing::{info, Level};

use civic_common::DispatchEngine;
use civicd::config::DaemonConfig;
use civicd::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Civic Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = DaemonConfig::load();
    let directory = config.build_directory()?;
    info!("Seeded {} accounts from config", directory.len());

    let engine = DispatchEngine::new(directory);
    let state = AppState::new(engine);

    info!("Civic Daemon ready");
    server::run(state, &config.bind_addr).await
}
