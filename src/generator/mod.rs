//! Test case generation adapter.
//!
//! [`TestCaseGenerator::generate`] turns a feature description into an
//! [`Envelope`]: it renders the prompt, makes one call to Ollama and folds
//! every outcome into either `Success` or `Failure`. It never returns an
//! error and never panics on backend misbehaviour, so the HTTP server and
//! the console can both treat it as total.

pub mod prompt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::OllamaConfig;
use crate::llm::GenerationError;
use crate::llm::ollama::OllamaClient;

// ── Envelope ──────────────────────────────────────────────────────────────────

/// Details of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Model that produced the text.
    pub model: String,
    /// Backend-reported total duration in nanoseconds.
    pub duration: u64,
}

impl Metadata {
    pub fn duration_secs(&self) -> f64 {
        self.duration as f64 / 1e9
    }
}

/// Outcome of one adapter call.
///
/// Serialises with a `status` tag:
/// `{"status":"success","data":…,"metadata":{…}}` or
/// `{"status":"error","message":…}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Envelope {
    #[serde(rename = "success")]
    Success { data: String, metadata: Metadata },
    #[serde(rename = "error")]
    Failure { message: String },
}

impl Envelope {
    pub fn failure(message: impl Into<String>) -> Self {
        Envelope::Failure { message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }
}

// ── Adapter ───────────────────────────────────────────────────────────────────

/// Stateless generation adapter. Share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TestCaseGenerator {
    client: OllamaClient,
    default_model: String,
}

impl TestCaseGenerator {
    pub fn new(client: OllamaClient, default_model: impl Into<String>) -> Self {
        Self { client, default_model: default_model.into() }
    }

    pub fn from_config(config: &OllamaConfig) -> Result<Self, GenerationError> {
        Ok(Self::new(OllamaClient::from_config(config)?, config.default_model.clone()))
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn client(&self) -> &OllamaClient {
        &self.client
    }

    pub fn render_prompt(&self, text: &str) -> String {
        prompt::render(text)
    }

    /// Generate test cases for `text` with `model`, or the default model
    /// when `model` is `None` or blank. A given id is sent and echoed as-is.
    pub async fn generate(&self, text: &str, model: Option<&str>) -> Envelope {
        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(self.default_model.as_str());
        let prompt = prompt::render(text);

        info!(model, "sending request to Ollama");

        match self.client.generate(model, &prompt).await {
            Ok(reply) => Envelope::Success {
                data: reply.response,
                metadata: Metadata { model: model.to_string(), duration: reply.total_duration },
            },
            Err(e) => {
                warn!(model, error = %e, "generation failed");
                Envelope::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{recording_backend, reply_with, slow_backend, spawn_backend, unreachable_url};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::time::Duration;

    fn generator(url: String) -> TestCaseGenerator {
        TestCaseGenerator::new(OllamaClient::new(url, 0.5, 5).unwrap(), "llama3.2")
    }

    async fn ok_backend() -> String {
        spawn_backend(reply_with(
            StatusCode::OK,
            json!({"response": "X", "total_duration": 5_000_000_000u64}),
        ))
        .await
    }

    #[tokio::test]
    async fn success_uses_default_model() {
        let envelope = generator(ok_backend().await).generate("login", None).await;
        assert_eq!(
            envelope,
            Envelope::Success {
                data: "X".into(),
                metadata: Metadata { model: "llama3.2".into(), duration: 5_000_000_000 },
            }
        );
    }

    #[tokio::test]
    async fn requested_model_echoed_in_metadata() {
        let envelope = generator(ok_backend().await).generate("login", Some("mistral:7b")).await;
        match envelope {
            Envelope::Success { metadata, .. } => assert_eq!(metadata.model, "mistral:7b"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn requested_model_not_rewritten() {
        let (router, seen) = recording_backend(json!({"response": "ok", "total_duration": 1}));
        let g = generator(spawn_backend(router).await);
        match g.generate("x", Some(" phi3 ")).await {
            Envelope::Success { metadata, .. } => assert_eq!(metadata.model, " phi3 "),
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(seen.lock().unwrap()[0]["model"], " phi3 ");
    }

    #[tokio::test]
    async fn timeout_is_failure_naming_limit() {
        let url = spawn_backend(slow_backend(
            Duration::from_secs(3),
            json!({"response": "late", "total_duration": 1}),
        ))
        .await;
        let g = TestCaseGenerator::new(OllamaClient::new(url, 0.5, 1).unwrap(), "llama3.2");
        assert_eq!(
            g.generate("login", None).await,
            Envelope::failure("Ollama request timed out after 1s")
        );
    }

    #[tokio::test]
    async fn blank_model_falls_back_to_default() {
        let envelope = generator(ok_backend().await).generate("login", Some("  ")).await;
        match envelope {
            Envelope::Success { metadata, .. } => assert_eq!(metadata.model, "llama3.2"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sends_rendered_prompt() {
        let (router, seen) = recording_backend(json!({"response": "ok", "total_duration": 7}));
        let g = generator(spawn_backend(router).await);
        let input = "Verify successful login with valid credentials";
        g.generate(input, None).await;

        let body = seen.lock().unwrap()[0].clone();
        assert_eq!(body["prompt"], g.render_prompt(input));
        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["stream"], false);
    }

    #[tokio::test]
    async fn unreachable_backend_is_failure() {
        let envelope = generator(unreachable_url().await).generate("login", None).await;
        match envelope {
            Envelope::Failure { message } => assert!(message.contains("Could not connect to Ollama")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_500_is_failure_with_status() {
        let url = spawn_backend(reply_with(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "boom"}),
        ))
        .await;
        let envelope = generator(url).generate("login", None).await;
        match envelope {
            Envelope::Failure { message } => {
                assert!(message.contains("500"), "message: {message}");
                assert!(message.contains("boom"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_failure() {
        let url = spawn_backend(reply_with(StatusCode::OK, json!({"unexpected": true}))).await;
        let envelope = generator(url).generate("login", None).await;
        assert!(!envelope.is_success());
    }

    #[tokio::test]
    async fn empty_text_still_yields_envelope() {
        let envelope = generator(ok_backend().await).generate("", None).await;
        assert!(envelope.is_success());
    }

    #[test]
    fn envelope_json_shape() {
        let ok = Envelope::Success {
            data: "X".into(),
            metadata: Metadata { model: "llama3.2".into(), duration: 5_000_000_000 },
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"status": "success", "data": "X", "metadata": {"model": "llama3.2", "duration": 5_000_000_000u64}})
        );
        assert_eq!(
            serde_json::to_value(Envelope::failure("nope")).unwrap(),
            json!({"status": "error", "message": "nope"})
        );
    }

    #[test]
    fn duration_in_seconds() {
        let m = Metadata { model: "m".into(), duration: 2_500_000_000 };
        assert!((m.duration_secs() - 2.5).abs() < f64::EPSILON);
    }
}
