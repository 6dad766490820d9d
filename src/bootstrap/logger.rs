//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init_for`] (or [`init`]) once at startup. Both binaries route
//! through here so `-v` flags, `RUST_LOG` and `app.log_level` resolve the
//! same way everywhere.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::Config;
use crate::error::AppError;

/// Install the subscriber for `config`, letting a CLI level win.
///
/// Without a CLI level, `RUST_LOG` beats `app.log_level`. Returns the
/// level string that was requested, for the startup log line.
pub fn init_for(config: &Config, cli_level: Option<&'static str>) -> Result<String, AppError> {
    let level = cli_level.unwrap_or(config.log_level.as_str());
    init(level, cli_level.is_some(), config.log_file.as_deref())?;
    Ok(level.to_string())
}

/// Initialise the global tracing subscriber.
///
/// `level` accepts standard level strings or full `EnvFilter` directives
/// (`"info,local_testgen=debug"`). With `prefer_level`, `level` wins and
/// `RUST_LOG` is only a fallback when `level` is invalid; otherwise
/// `RUST_LOG` wins.
pub fn init(level: &str, prefer_level: bool, log_file: Option<&Path>) -> Result<(), AppError> {
    let writer = match log_file {
        Some(path) => BoxMakeWriter::new(open_log_file(path)?),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level, prefer_level)?)
        .with_writer(writer)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

fn build_filter(level: &str, prefer_level: bool) -> Result<EnvFilter, AppError> {
    if prefer_level {
        EnvFilter::try_new(level).or_else(|level_err| {
            EnvFilter::try_from_default_env().map_err(|env_err| {
                AppError::Logger(format!(
                    "invalid log level '{level}': {level_err}; RUST_LOG parse failed: {env_err}"
                ))
            })
        })
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File, AppError> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Logger(format!("failed to open log file '{}': {e}", path.display())))
}

/// Map a count of `-v` flags to a level.
///
/// `-v` warn, `-vv` info, `-vvv` debug, `-vvvv`+ trace. Zero keeps the
/// configured level.
pub fn level_for_verbosity(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    }
}
