//! Ollama `/api/generate` client.
//!
//! One non-streamed round trip per call. The wire request type is private to
//! this module; callers get a [`GenerateReply`] or a [`GenerationError`].

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::config::OllamaConfig;
use crate::llm::GenerationError;

/// Fields the adapter depends on from a generate reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateReply {
    /// Generated text.
    pub response: String,
    /// Elapsed time reported by Ollama, in nanoseconds.
    pub total_duration: u64,
}

/// Client for a single Ollama generate endpoint.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    api_url: String,
    temperature: f32,
    timeout_seconds: u64,
}

impl OllamaClient {
    pub fn new(
        api_url: impl Into<String>,
        temperature: f32,
        timeout_seconds: u64,
    ) -> Result<Self, GenerationError> {
        // The backend is local; system proxy settings must not reroute it.
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .no_proxy()
            .build()
            .map_err(|e| GenerationError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_url: api_url.into(), temperature, timeout_seconds })
    }

    pub fn from_config(config: &OllamaConfig) -> Result<Self, GenerationError> {
        Self::new(config.api_url.clone(), config.temperature, config.timeout_seconds)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Generate with the configured temperature.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<GenerateReply, GenerationError> {
        self.generate_raw(model, prompt, Some(self.temperature)).await
    }

    /// Generate with an explicit temperature; `None` leaves it out of the
    /// payload so the backend uses its own default.
    pub async fn generate_raw(
        &self,
        model: &str,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<GenerateReply, GenerationError> {
        let payload = GenerateRequest { model, prompt, stream: false, temperature };

        debug!(
            url = %self.api_url,
            model,
            temperature = ?temperature,
            prompt_len = prompt.len(),
            "sending generate request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full generate request payload");
        }

        let response = self
            .client
            .post(&self.api_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.api_url, error = %e, "generate request failed (transport)");
                self.classify(e)
            })?;

        let response = check_status(response).await?;

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let reply: GenerateReply = serde_json::from_slice(&body).map_err(|e| {
            error!(error = %e, "failed to deserialize generate response");
            GenerationError::Parse(e.to_string())
        })?;

        debug!(
            response_len = reply.response.len(),
            total_duration = reply.total_duration,
            "received generate response"
        );
        Ok(reply)
    }

    fn classify(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout { seconds: self.timeout_seconds }
        } else if e.is_connect() {
            GenerationError::Unreachable { url: self.api_url.clone() }
        } else {
            GenerationError::Request(e.to_string())
        }
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

// Ollama reports failures as `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// Return the response if successful, or a `Status` error carrying the
/// backend's detail text.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let detail = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(env) => env.error,
        Err(_) if body.trim().is_empty() => {
            status.canonical_reason().unwrap_or("no detail").to_string()
        }
        Err(_) => body.trim().to_string(),
    };

    error!(%status, %detail, "generate request returned HTTP error");
    Err(GenerationError::Status { status, detail })
}
