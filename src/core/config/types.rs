//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs that the adapter and the
//! front ends consume. Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;

// ── Ollama ──────────────────────────────────────────────────────────────────

/// Inference backend configuration (`[ollama]`).
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Full generate endpoint URL, e.g. `http://localhost:11434/api/generate`.
    pub api_url: String,
    /// Model used when a request does not name one.
    pub default_model: String,
    /// Sampling temperature sent with every generation request.
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

// ── Front ends ──────────────────────────────────────────────────────────────

/// HTTP API configuration (`[server]`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the axum listener binds to.
    pub bind: String,
}

/// Interactive console configuration (`[console]`).
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Maximum number of chat entries kept in memory; oldest are evicted.
    pub history_cap: usize,
}

// ── Top-level ───────────────────────────────────────────────────────────────

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Optional log file (already expanded, no `~`). `None` logs to stderr.
    pub log_file: Option<PathBuf>,
    pub ollama: OllamaConfig,
    pub server: ServerConfig,
    pub console: ConsoleConfig,
}

/// Env-var overrides applied on top of the file values.
///
/// Tests construct this directly instead of mutating the process env.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `TESTGEN_LOG_LEVEL`
    pub log_level: Option<String>,
    /// `TESTGEN_OLLAMA_URL`
    pub ollama_url: Option<String>,
    /// `TESTGEN_MODEL`
    pub model: Option<String>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("TESTGEN_LOG_LEVEL").ok(),
            ollama_url: std::env::var("TESTGEN_OLLAMA_URL").ok(),
            model: std::env::var("TESTGEN_MODEL").ok(),
        }
    }
}
