//! Error handling module for SceneValidator

use std::time::Duration;

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Failures of the perception layer, raised before any record reaches the engine
#[derive(Error, Debug)]
pub enum PerceptionError {
    /// Provider did not answer within the configured timeout
    #[error("Perception provider timed out after {after:?} on {frame}")]
    Timeout { frame: String, after: Duration },

    /// Provider rejected the configured credentials
    #[error("Perception provider rejected credentials: {0}")]
    Auth(String),

    /// Provider asked us to slow down
    #[error("Perception provider rate limited the request")]
    RateLimited { retry_after_ms: Option<u64> },

    /// Provider is temporarily unreachable
    #[error("Perception provider unavailable: {0}")]
    Unavailable(String),

    /// No analysis exists for the frame
    #[error("No analysis found for frame: {0}")]
    NotFound(String),

    /// Provider output could not be normalized
    #[error("Malformed analysis for frame {frame}: {reason}")]
    Malformed { frame: String, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PerceptionError {
    pub fn malformed(frame: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            frame: frame.into(),
            reason: reason.into(),
        }
    }

    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PerceptionError::Timeout { .. }
                | PerceptionError::RateLimited { .. }
                | PerceptionError::Unavailable(_)
        )
    }

    /// Provider-requested delay before the next attempt, if any
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            PerceptionError::RateLimited { retry_after_ms } => *retry_after_ms,
            _ => None,
        }
    }
}

/// Main error type for SceneValidator operations
#[derive(Error, Debug)]
pub enum SceneValidatorError {
    /// Scoring engine rejected the input or configuration
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Frame acquisition failed
    #[error(transparent)]
    Perception(#[from] PerceptionError),

    /// Settings could not be loaded or are inconsistent
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Report could not be rendered or written
    #[error("Failed to write report: {message}")]
    Output { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SceneValidatorError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}

/// Result type alias for SceneValidator operations
pub type SceneValidatorResult<T> = std::result::Result<T, SceneValidatorError>;
