//! Mock backend for testing
//!
//! One instance stands in for every external seam (embeddings, vector
//! store, completions, file transport) and counts calls so tests can assert
//! exactly which downstream operations ran.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    ChatCompletions, Embeddings, FileSource, Metadata, Result, SearchMatch, VectorStore,
};

/// Canned backend implementing all retrieval seams
pub struct MockBackend {
    embedding: Vec<f32>,
    matches: Vec<SearchMatch>,
    completion: String,
    file_bytes: Vec<u8>,

    embed_calls: AtomicUsize,
    search_calls: AtomicUsize,
    upsert_calls: AtomicUsize,
    complete_calls: AtomicUsize,

    embedded_texts: Mutex<Vec<String>>,
    upserts: Mutex<Vec<(Vec<f32>, Metadata)>>,
    completed_prompts: Mutex<Vec<String>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            embedding: vec![0.1, 0.2, 0.3],
            matches: Vec::new(),
            completion: "mock answer".to_string(),
            file_bytes: Vec::new(),
            embed_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            upsert_calls: AtomicUsize::new(0),
            complete_calls: AtomicUsize::new(0),
            embedded_texts: Mutex::new(Vec::new()),
            upserts: Mutex::new(Vec::new()),
            completed_prompts: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    /// Create a mock with default canned data and no search matches
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned search matches
    pub fn with_matches(mut self, matches: Vec<SearchMatch>) -> Self {
        self.matches = matches;
        self
    }

    /// Set the canned completion text
    pub fn with_completion(mut self, completion: impl Into<String>) -> Self {
        self.completion = completion.into();
        self
    }

    /// Set the bytes served for file downloads and URL fetches
    pub fn with_file_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.file_bytes = bytes;
        self
    }

    /// Number of embed calls so far
    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    /// Number of search calls so far
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of upsert calls so far
    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    /// Number of completion calls so far
    pub fn complete_calls(&self) -> usize {
        self.complete_calls.load(Ordering::SeqCst)
    }

    /// Texts passed to embed, in call order
    pub fn embedded_texts(&self) -> Vec<String> {
        self.embedded_texts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Vectors and metadata passed to upsert, in call order
    pub fn upserts(&self) -> Vec<(Vec<f32>, Metadata)> {
        self.upserts.lock().map(|u| u.clone()).unwrap_or_default()
    }

    /// User prompts passed to complete, in call order
    pub fn completed_prompts(&self) -> Vec<String> {
        self.completed_prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Embeddings for MockBackend {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut texts) = self.embedded_texts.lock() {
            texts.push(text.to_string());
        }
        Ok(self.embedding.clone())
    }
}

#[async_trait]
impl VectorStore for MockBackend {
    async fn upsert(&self, values: Vec<f32>, metadata: Metadata) -> Result<String> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut upserts) = self.upserts.lock() {
            upserts.push((values, metadata));
        }
        Ok("doc-mock".to_string())
    }

    async fn search(&self, _values: &[f32], top_k: usize) -> Result<Vec<SearchMatch>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }
}

#[async_trait]
impl ChatCompletions for MockBackend {
    async fn complete(&self, _system_prompt: &str, user_content: &str) -> Result<String> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.completed_prompts.lock() {
            prompts.push(user_content.to_string());
        }
        Ok(self.completion.clone())
    }
}

#[async_trait]
impl FileSource for MockBackend {
    async fn download_file(&self, _file_id: &str) -> Result<Vec<u8>> {
        Ok(self.file_bytes.clone())
    }

    async fn fetch_url(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(self.file_bytes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockBackend::new();

        mock.embed("hello").await.unwrap();
        mock.embed("world").await.unwrap();

        assert_eq!(mock.embed_calls(), 2);
        assert_eq!(mock.embedded_texts(), vec!["hello", "world"]);
        assert_eq!(mock.search_calls(), 0);
    }

    #[tokio::test]
    async fn test_mock_search_respects_top_k() {
        let matches = (0..10)
            .map(|i| SearchMatch {
                id: format!("doc-{}", i),
                score: 1.0 - i as f32 * 0.1,
                values: vec![],
                metadata: Metadata::new(),
            })
            .collect();

        let mock = MockBackend::new().with_matches(matches);
        let results = mock.search(&[0.1], 5).await.unwrap();
        assert_eq!(results.len(), 5);
    }
}
