//! Configuration loading with env-var overrides.
//!
//! Reads TOML files, supports `[meta] base = "..."` inheritance chains,
//! and applies the `TESTGEN_*` env overrides.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

use super::raw::RawConfig;
use super::types::*;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Deep-merge two TOML values.
/// Tables merge recursively; any other overlay value replaces the base value.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_tbl), toml::Value::Table(overlay_tbl)) => {
            for (key, ov_val) in overlay_tbl {
                let merged = match base_tbl.remove(&key) {
                    Some(base_val) => merge_toml(base_val, ov_val),
                    None => ov_val,
                };
                base_tbl.insert(key, merged);
            }
            toml::Value::Table(base_tbl)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file, follow its `[meta] base` chain, and return the merged
/// value. `visited` holds canonical paths already seen to catch cycles.
fn load_raw_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<toml::Value, AppError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(AppError::Config(format!(
            "circular base reference detected at: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let overlay_val: toml::Value = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let base_ref = overlay_val
        .get("meta")
        .and_then(|m| m.get("base"))
        .and_then(|b| b.as_str())
        .map(ToString::to_string);

    match base_ref {
        Some(base_str) => {
            let base_path = if Path::new(&base_str).is_absolute() {
                PathBuf::from(base_str)
            } else {
                path.parent().unwrap_or(Path::new(".")).join(base_str)
            };
            let base_val = load_raw_merged(&base_path, visited)?;
            Ok(merge_toml(base_val, overlay_val))
        }
        None => Ok(overlay_val),
    }
}

/// Load config from `config_path`, or `config/default.toml` when present,
/// or built-in defaults otherwise. Env overrides are applied in every case.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = Overrides::from_env();

    if let Some(path) = config_path {
        return load_from(Path::new(path), &overrides);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_from(default_path, &overrides)
    } else {
        defaults(&overrides)
    }
}

/// Load from an explicit path with explicit overrides.
/// Follows `[meta] base = "..."` inheritance chains before resolving.
pub fn load_from(path: &Path, overrides: &Overrides) -> Result<Config, AppError> {
    let merged_val = load_raw_merged(path, &mut HashSet::new())?;

    let parsed: RawConfig = Deserialize::deserialize(merged_val).map_err(|e: toml::de::Error| {
        AppError::Config(format!("config error in {}: {e}", path.display()))
    })?;

    resolve(parsed, overrides)
}

/// Built-in defaults with overrides applied; no file is read.
pub fn defaults(overrides: &Overrides) -> Result<Config, AppError> {
    resolve(RawConfig::default(), overrides)
}

fn resolve(raw: RawConfig, overrides: &Overrides) -> Result<Config, AppError> {
    let log_level = overrides.log_level.clone().unwrap_or(raw.app.log_level);
    let log_file = raw.app.log_file.as_deref().map(expand_home);

    let api_url = overrides.ollama_url.clone().unwrap_or(raw.ollama.api_url);
    let default_model = overrides.model.clone().unwrap_or(raw.ollama.default_model);

    if api_url.trim().is_empty() {
        return Err(AppError::Config("ollama.api_url must not be empty".into()));
    }
    if default_model.trim().is_empty() {
        return Err(AppError::Config("ollama.default_model must not be empty".into()));
    }
    if raw.ollama.timeout_seconds == 0 {
        return Err(AppError::Config("ollama.timeout_seconds must be greater than zero".into()));
    }
    if !(0.0..=2.0).contains(&raw.ollama.temperature) {
        return Err(AppError::Config(format!(
            "ollama.temperature must be within 0.0..=2.0, got {}",
            raw.ollama.temperature
        )));
    }
    if raw.console.history_cap == 0 {
        return Err(AppError::Config("console.history_cap must be greater than zero".into()));
    }

    Ok(Config {
        log_level,
        log_file,
        ollama: OllamaConfig {
            api_url,
            default_model,
            temperature: raw.ollama.temperature,
            timeout_seconds: raw.ollama.timeout_seconds,
        },
        server: ServerConfig { bind: raw.server.bind },
        console: ConsoleConfig { history_cap: raw.console.history_cap },
    })
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
