//! Traits at the external-service seams
//!
//! Every non-trivial operation (embedding generation, nearest-neighbor
//! search, chat completion, document transport) is delegated to an external
//! managed service. These traits are the seams the router works against;
//! implementations live in `ragbot-providers`.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Metadata attached to a stored record (arbitrary JSON-compatible values)
pub type Metadata = HashMap<String, serde_json::Value>;

/// A record retrieved from the vector store
#[derive(Debug, Clone)]
pub struct SearchMatch {
    /// Stored record identifier
    pub id: String,
    /// Relevance score
    pub score: f32,
    /// Raw embedding values of the stored record
    pub values: Vec<f32>,
    /// Metadata stored alongside the vector
    pub metadata: Metadata,
}

/// Interface for embedding providers
#[async_trait]
pub trait Embeddings: Send + Sync {
    /// Generate an embedding vector for a single text
    ///
    /// The input is forwarded as-is; oversized inputs surface the provider's
    /// rejection verbatim. Fails when the provider returns zero entries.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Interface for the external vector store
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store one vector with metadata; returns the new record's identifier
    async fn upsert(&self, values: Vec<f32>, metadata: Metadata) -> Result<String>;

    /// Return the `top_k` nearest records to the query vector, ranked by
    /// score. An empty result is a caller-visible condition, not an error.
    async fn search(&self, values: &[f32], top_k: usize) -> Result<Vec<SearchMatch>>;
}

/// Interface for chat-completion providers
#[async_trait]
pub trait ChatCompletions: Send + Sync {
    /// Issue one completion request and return the first choice's text
    ///
    /// Fails when the provider call errors or returns no choices.
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String>;
}

/// Interface for fetching document bytes
///
/// Covers both transport-attached files (token-authenticated download by
/// file identifier) and arbitrary user-supplied URLs (unauthenticated GET).
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Download an attached file by its transport identifier
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;

    /// Fetch a document from an arbitrary absolute URL
    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>>;
}
