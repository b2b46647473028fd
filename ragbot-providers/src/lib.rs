//! # ragbot-providers
//!
//! External-service clients for the ragbot assistant: OpenAI embeddings and
//! chat completions, the Pinecone vector index, and the Telegram transport.
//! All clients are long-lived; each is constructed once at startup and shared
//! across event handlers.

#![warn(missing_docs)]

// Re-export core types for convenience
pub use ragbot_core::error::{Error, Result};
pub use ragbot_core::retrieval::{
    ChatCompletions, Embeddings, FileSource, Metadata, SearchMatch, VectorStore,
};

pub mod mock;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "pinecone")]
pub mod pinecone;

#[cfg(feature = "telegram")]
pub mod telegram;

/// HTTP client configuration
#[derive(Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connection pool idle timeout
    pub pool_idle_timeout_secs: u64,
    /// Max idle connections per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            pool_idle_timeout_secs: 90,
            pool_max_idle_per_host: 32,
        }
    }
}

impl HttpConfig {
    /// Build a reqwest client
    pub fn build_client(&self) -> Result<reqwest::Client> {
        use std::time::Duration;

        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(self.pool_idle_timeout_secs))
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .build()
            .map_err(|e| Error::Internal(e.to_string()))
    }
}
