//! Inference backend access.
//!
//! [`ollama::OllamaClient`] is the only backend: a local Ollama server's
//! `/api/generate` endpoint. Every way a call can fail is a
//! [`GenerationError`] variant whose `Display` text is the human-readable
//! message shown to users; callers above the adapter only ever see that text.

pub mod ollama;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The TCP connection could not be established.
    #[error("Could not connect to Ollama at {url}. Ensure it is running.")]
    Unreachable { url: String },

    #[error("Ollama request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The backend answered with a non-2xx status.
    #[error("Ollama returned HTTP {status}: {detail}")]
    Status { status: reqwest::StatusCode, detail: String },

    /// The body was not JSON or lacked `response` / `total_duration`.
    #[error("failed to parse Ollama response: {0}")]
    Parse(String),

    #[error("Ollama request failed: {0}")]
    Request(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_message_names_backend() {
        let e = GenerationError::Unreachable { url: "http://localhost:11434/api/generate".into() };
        let msg = e.to_string();
        assert!(msg.starts_with("Could not connect to Ollama"));
        assert!(msg.contains("localhost:11434"));
    }

    #[test]
    fn status_message_includes_code_and_detail() {
        let e = GenerationError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            detail: "model crashed".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("model crashed"));
    }

    #[test]
    fn timeout_message_includes_seconds() {
        assert!(GenerationError::Timeout { seconds: 120 }.to_string().contains("120s"));
    }
}
