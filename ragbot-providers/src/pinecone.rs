//! Pinecone vector index client
//!
//! The index host is resolved once at startup through the controller API;
//! the resulting handle is long-lived and shared read-only across handlers.
//! Record identifiers are collision-resistant (`doc-<uuid>`), so concurrent
//! upserts never overwrite each other.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, HttpConfig, Metadata, Result, SearchMatch, VectorStore};

/// Pinecone control-plane client; resolves index names to data-plane hosts
pub struct Pinecone {
    client: reqwest::Client,
    api_key: String,
    environment: String,
}

impl Pinecone {
    /// Create from API key and environment (region)
    pub fn new(api_key: impl Into<String>, environment: impl Into<String>) -> Result<Self> {
        let client = HttpConfig::default().build_client()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            environment: environment.into(),
        })
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "Api-Key",
            HeaderValue::from_str(&self.api_key).map_err(|e| Error::Internal(e.to_string()))?,
        );
        Ok(headers)
    }

    /// Resolve an index by name and return a long-lived data-plane handle
    pub async fn connect(&self, index_name: &str) -> Result<PineconeIndex> {
        let url = format!(
            "https://controller.{}.pinecone.io/databases/{}",
            self.environment, index_name
        );

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers()?)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::VectorStore(format!(
                "Failed to describe index {}: {} {}",
                index_name, status, text
            )));
        }

        let description: IndexDescription = response
            .json()
            .await
            .map_err(|e| Error::VectorStore(format!("Failed to parse index description: {}", e)))?;

        tracing::info!(index = index_name, host = %description.status.host, "resolved index host");

        Ok(PineconeIndex {
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            host: description.status.host,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    status: IndexStatus,
}

#[derive(Debug, Deserialize)]
struct IndexStatus {
    host: String,
}

/// Data-plane handle bound to one resolved index host
pub struct PineconeIndex {
    client: reqwest::Client,
    api_key: String,
    host: String,
}

impl PineconeIndex {
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "Api-Key",
            HeaderValue::from_str(&self.api_key).map_err(|e| Error::Internal(e.to_string()))?,
        );
        Ok(headers)
    }
}

#[derive(Debug, Serialize)]
struct UpsertRequest {
    vectors: Vec<VectorRecord>,
}

#[derive(Debug, Serialize)]
struct VectorRecord {
    id: String,
    values: Vec<f32>,
    metadata: Metadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    vector: Vec<f32>,
    top_k: usize,
    include_values: bool,
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
struct ApiMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    values: Vec<f32>,
    #[serde(default)]
    metadata: Metadata,
}

#[async_trait]
impl VectorStore for PineconeIndex {
    async fn upsert(&self, values: Vec<f32>, metadata: Metadata) -> Result<String> {
        let id = format!("doc-{}", Uuid::new_v4());
        let request = UpsertRequest {
            vectors: vec![VectorRecord {
                id: id.clone(),
                values,
                metadata,
            }],
        };

        let response = self
            .client
            .post(format!("https://{}/vectors/upsert", self.host))
            .headers(self.build_headers()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::VectorStore(format!(
                "Upsert failed: {} {}",
                status, text
            )));
        }

        Ok(id)
    }

    async fn search(&self, values: &[f32], top_k: usize) -> Result<Vec<SearchMatch>> {
        let request = QueryRequest {
            vector: values.to_vec(),
            top_k,
            include_values: true,
            include_metadata: true,
        };

        let response = self
            .client
            .post(format!("https://{}/query", self.host))
            .headers(self.build_headers()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::VectorStore(format!(
                "Query failed: {} {}",
                status, text
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::VectorStore(format!("Failed to parse query response: {}", e)))?;

        Ok(body
            .matches
            .into_iter()
            .map(|m| SearchMatch {
                id: m.id,
                score: m.score,
                values: m.values,
                metadata: m.metadata,
            })
            .collect())
    }
}
