//! Error types for the API client

use fatsecret_crypto::CryptoError;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed inside the reqwest transport
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A transport collaborator reported a failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Signing failed
    #[error("Signing error: {0}")]
    Crypto(#[from] CryptoError),

    /// The API has no such method for the selected resource
    #[error("{operation} is not supported for {resource}")]
    UnsupportedOperation {
        /// Operation name, e.g. `autocomplete`
        operation: &'static str,
        /// Resource name, e.g. `recipe`
        resource: &'static str,
    },
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Check if this error came from the network layer
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Transport(_))
    }
}
