//! Axum handlers for `/api/*` routes.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use super::ServerState;
use crate::generator::Envelope;

// ── Request types ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct GenerateRequest {
    input_text: String,
    #[serde(default)]
    model: Option<String>,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// POST /api/generate
///
/// A success envelope is returned as-is with `200`. A failure envelope becomes
/// `500 {"detail": message}`.
pub(super) async fn generate(
    State(state): State<ServerState>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    match state.generator.generate(&req.input_text, req.model.as_deref()).await {
        Envelope::Failure { message } => {
            warn!(%message, "generate request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": message }))).into_response()
        }
        success => (StatusCode::OK, Json(success)).into_response(),
    }
}

/// GET /api/health
pub(super) async fn health(State(state): State<ServerState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.generator.default_model(),
        "backend": state.generator.client().api_url(),
    }))
}
