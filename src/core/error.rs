//! Application-wide error types.
//!
//! These cover process-level failures only (startup, config, binding).
//! Generation failures never surface here; the adapter returns them as
//! [`crate::generator::Envelope::Failure`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("server error: {0}")]
    Server(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().starts_with("config error"));
        assert!(e.to_string().contains("missing field"));
    }

    #[test]
    fn logger_error_display() {
        let e = AppError::Logger("already initialized".into());
        assert!(e.to_string().contains("already initialized"));
    }

    #[test]
    fn server_error_display() {
        let e = AppError::Server("bind failed on 127.0.0.1:8000".into());
        assert!(e.to_string().contains("127.0.0.1:8000"));
        let _: &dyn Error = &e;
    }
}
