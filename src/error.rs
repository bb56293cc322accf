//! Crate-level error type
//!
//! Handlers never let these escape `handle`; they are mapped to a failure
//! envelope. The CLI and embedding hosts see them for ambient failures
//! (configuration, malformed parameter bags, host capabilities).

use crate::envelope::{ResultEnvelope, STATUS_FAILURE};
use thiserror::Error;

/// Main error type for handler operations
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Parameter error: {0}")]
    Params(#[from] crate::params::ParamsError),

    #[error("Host error: {0}")]
    Host(#[from] crate::host::HostError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to render configuration: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HandlerError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Status code reported for this error
    pub fn status_code(&self) -> u16 {
        STATUS_FAILURE
    }

    /// Failure envelope describing this error
    ///
    /// Invalid input carries its message verbatim; everything else reports
    /// the error's display text.
    pub fn to_envelope(&self) -> ResultEnvelope {
        match self {
            HandlerError::InvalidInput { message } => ResultEnvelope::failure(message.clone()),
            other => ResultEnvelope::failure(other.to_string()),
        }
    }
}

/// Result type for handler operations
pub type HandlerResult<T> = Result<T, HandlerError>;
