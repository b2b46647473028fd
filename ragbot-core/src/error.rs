//! Error types for ragbot

use thiserror::Error;

/// Result type alias using ragbot's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ragbot
#[derive(Debug, Error)]
pub enum Error {
    // ============ Configuration Errors ============
    /// Required configuration is missing or empty
    #[error("Configuration error: {0}")]
    Config(String),

    // ============ Provider Errors ============
    /// Embedding or completion API error
    #[error("Provider API error: {0}")]
    ProviderApi(String),

    /// Provider authentication failed
    #[error("Provider authentication error: {0}")]
    ProviderAuth(String),

    /// Vector store operation failed
    #[error("Vector store error: {0}")]
    VectorStore(String),

    // ============ Transport Errors ============
    /// Chat transport (Telegram) API error
    #[error("Transport error: {0}")]
    Transport(String),

    // ============ Document Errors ============
    /// Document payload did not match the expected schema
    #[error("Failed to process {format} document: {message}")]
    DocumentParse {
        /// Document format being decoded
        format: String,
        /// Error message
        message: String,
    },

    // ============ Network Errors ============
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // ============ System Errors ============
    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============ Generic Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new document parse error
    pub fn document_parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DocumentParse {
            format: format.into(),
            message: message.into(),
        }
    }
}
