//! local-testgen — turns feature descriptions into manual QA test cases
//! using a model served by a local Ollama instance.
//!
//! The [`generator::TestCaseGenerator`] adapter is the core; the HTTP
//! server, the console and the probe are thin front ends over it.

pub mod bootstrap;
pub mod core;
pub mod generator;
pub mod llm;
pub mod probe;

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "server")]
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

pub use bootstrap::logger;
pub use self::core::{config, error};
