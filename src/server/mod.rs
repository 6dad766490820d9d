//! Axum HTTP front end for the generation adapter.
//!
//! ## URL layout
//!
//! ```text
//! POST /api/generate   {"input_text": "...", "model": "..."?}
//! GET  /api/health
//! ```
//!
//! CORS is fully open so a browser page served from anywhere can call the
//! API. The [`CancellationToken`] is wired to axum's graceful shutdown.

mod api;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::AppError;
use crate::generator::TestCaseGenerator;

/// Router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone — the adapter is reference-counted.
#[derive(Clone)]
pub(crate) struct ServerState {
    pub generator: Arc<TestCaseGenerator>,
}

/// Bind `bind_addr` and serve until `shutdown` is cancelled.
pub async fn run(
    bind_addr: &str,
    generator: Arc<TestCaseGenerator>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let router = build_router(generator);

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "http api listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("axum server error: {e}")))?;

    info!("http api shut down");
    Ok(())
}

pub fn build_router(generator: Arc<TestCaseGenerator>) -> Router {
    Router::new()
        .route("/api/generate", post(api::generate))
        .route("/api/health",   get(api::health))
        .layer(CorsLayer::permissive())
        .with_state(ServerState { generator })
}
