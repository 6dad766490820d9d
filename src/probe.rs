//! Connectivity probe: one fixed prompt, check the reply for a known phrase.

use tracing::{info, warn};

use crate::llm::ollama::OllamaClient;

pub const PROBE_PROMPT: &str = "Say 'Connection Established' and nothing else.";
pub const EXPECTED_PHRASE: &str = "Connection Established";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The backend answered and the reply contains [`EXPECTED_PHRASE`].
    Established { reply: String },
    /// The backend answered with something else.
    Unexpected { reply: String },
    Failed { message: String },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Established { .. })
    }

    /// Human-readable status line for the terminal.
    pub fn summary(&self) -> String {
        match self {
            ProbeOutcome::Established { .. } => "[SUCCESS] Ollama is running and accessible.".into(),
            ProbeOutcome::Unexpected { .. } => "[WARNING] response received but content differed.".into(),
            ProbeOutcome::Failed { message } => format!("[ERROR] {message}"),
        }
    }
}

/// Send [`PROBE_PROMPT`] to `model` without a temperature.
pub async fn check(client: &OllamaClient, model: &str) -> ProbeOutcome {
    info!(url = %client.api_url(), model, "probing Ollama");

    match client.generate_raw(model, PROBE_PROMPT, None).await {
        Ok(reply) => {
            let reply = reply.response.trim().to_string();
            if reply.contains(EXPECTED_PHRASE) {
                ProbeOutcome::Established { reply }
            } else {
                warn!(%reply, "probe reply did not contain the expected phrase");
                ProbeOutcome::Unexpected { reply }
            }
        }
        Err(e) => ProbeOutcome::Failed { message: e.to_string() },
    }
}
