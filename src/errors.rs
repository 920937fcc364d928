//! Error types for portal operations

use thiserror::Error;

/// Errors that can occur while talking to the provisioning backend
#[derive(Debug, Error)]
pub enum PortalError {
    /// Transport-level HTTP failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// Requested user/queue/topic does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Submission rejected before reaching the backend
    #[error("Submission error: {0}")]
    Submission(String),
}

impl PortalError {
    /// Message suitable for the single error banner shown to the user
    pub fn banner_message(&self) -> String {
        match self {
            PortalError::Backend { message, .. } | PortalError::NotFound(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Result type for portal operations
pub type PortalResult<T> = Result<T, PortalError>;

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PortalError::Deserialization(err.to_string())
        } else {
            PortalError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}
