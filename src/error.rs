//! Error types for Plinth operations.
//!
//! This module defines [`PlinthError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PlinthError` for domain-specific errors that need distinct handling
//! - Engine failures carry their own typed error ([`crate::engine::EngineError`])
//!   so callers can match on specific failure kinds
//! - Use `anyhow::Error` (via `PlinthError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::EngineError;

/// Core error type for Plinth operations.
#[derive(Debug, Error)]
pub enum PlinthError {
    /// Failed to parse a configuration or manifest file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The generation engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Plinth operations.
pub type Result<T> = std::result::Result<T, PlinthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PlinthError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn engine_error_is_transparent() {
        let err: PlinthError = EngineError::RepositoryNotFound {
            trace: "not found at:\n/tmp/clones/repo".into(),
        }
        .into();
        assert!(err.to_string().ends_with("/tmp/clones/repo"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PlinthError = io_err.into();
        assert!(matches!(err, PlinthError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PlinthError::ConfigParseError {
                path: PathBuf::from("x.yml"),
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
