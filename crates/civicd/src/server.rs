//! HTTP server for civicd

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::Router;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::info;

use civic_common::DispatchEngine;

use crate::routes;

/// Application state shared across handlers.
///
/// The engine sits behind one lock: every mutation resolves the caller and
/// applies its status compare-and-set inside a single write guard, so
/// racing requests serialize rather than double-apply.
pub struct AppState {
    pub engine: Arc<RwLock<DispatchEngine>>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: DispatchEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
            start_time: Instant::now(),
        }
    }
}

/// Build the full router. Separate from [`run`] so tests can drive the API
/// without binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::complaint_routes())
        .merge(routes::admin_routes())
        .merge(routes::officer_routes())
        .merge(routes::vendor_routes())
        .merge(routes::profile_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until the process is stopped.
pub async fn run(state: AppState, bind_addr: &str) -> Result<()> {
    let app = app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("  Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
