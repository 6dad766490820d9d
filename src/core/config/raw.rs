//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults, so
//! every section and key is optional. The `load` module converts them into
//! the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape — serde target before resolution.
///
/// `[meta]` is consumed by the loader while following base chains and is
/// ignored here.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub app: RawApp,
    #[serde(default)]
    pub ollama: RawOllama,
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub console: RawConsole,
}

#[derive(Deserialize)]
pub(super) struct RawApp {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for RawApp {
    fn default() -> Self {
        Self { log_level: default_log_level(), log_file: None }
    }
}

// ── Ollama ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawOllama {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RawOllama {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            default_model: default_model(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// ── Front ends ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for RawServer {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Deserialize)]
pub(super) struct RawConsole {
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
}

impl Default for RawConsole {
    fn default() -> Self {
        Self { history_cap: default_history_cap() }
    }
}

// ── Defaults ────────────────────────────────────────────────────────────────

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_api_url() -> String {
    "http://localhost:11434/api/generate".to_string()
}

pub(super) fn default_model() -> String {
    "llama3.2".to_string()
}

pub(super) fn default_temperature() -> f32 {
    0.5
}

pub(super) fn default_timeout_seconds() -> u64 {
    120
}

pub(super) fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

pub(super) fn default_history_cap() -> usize {
    200
}
