//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or the file given with `-f`), then applies `TESTGEN_LOG_LEVEL`,
//! `TESTGEN_OLLAMA_URL` and `TESTGEN_MODEL`.
//!
//! # Module layout
//!
//! - **types** — Public configuration structs (`Config`, `OllamaConfig`, …).
//! - **raw** — Raw TOML deserialization types with serde defaults; private.
//! - **load** — `load`, `load_from`, `defaults`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{defaults, expand_home, load, load_from};
pub use types::*;
