//! Simulated Ollama backends for unit tests.
//!
//! Each backend is a real axum server on an ephemeral loopback port, so the
//! client code under test goes through an actual HTTP round trip.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::Value;
use tokio::net::TcpListener;

/// Serve `router` on `127.0.0.1:0` and return its generate endpoint URL.
pub(crate) async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/generate")
}

/// A generate URL on a port that was just released, so connecting fails.
pub(crate) async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/generate")
}

/// Backend that answers every generate call with `status` and `body`.
pub(crate) fn reply_with(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        "/api/generate",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}

/// Backend that waits `delay` before answering `200` with `body`.
pub(crate) fn slow_backend(delay: Duration, body: Value) -> Router {
    Router::new().route(
        "/api/generate",
        post(move || {
            let body = body.clone();
            async move {
                tokio::time::sleep(delay).await;
                Json(body)
            }
        }),
    )
}

/// Backend that records each request body and replies `200` with `reply`.
pub(crate) fn recording_backend(reply: Value) -> (Router, Arc<Mutex<Vec<Value>>>) {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route(
            "/api/generate",
            post(
                |State((seen, reply)): State<(Arc<Mutex<Vec<Value>>>, Value)>,
                 Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body);
                    Json(reply)
                },
            ),
        )
        .with_state((seen.clone(), reply));
    (router, seen)
}
