//! Message routing
//!
//! Every inbound event takes exactly one of three paths: a command reply, a
//! text turn (query or URL reference), or a document upload. Each path
//! produces exactly one outbound reply; failures inside a path are mapped to
//! a human-readable reply and never escape to the caller.

use std::sync::Arc;

use ragbot_core::compose::{compose_prompt, ANSWER_SYSTEM_PROMPT};
use ragbot_core::document::{decode, looks_like_url, DecodeOutcome, DocumentKind};
use ragbot_core::error::{Error, Result};
use ragbot_core::event::{EventKind, InboundEvent, OutboundReply};
use ragbot_core::retrieval::{
    ChatCompletions, Embeddings, FileSource, Metadata, VectorStore,
};
use ragbot_core::session::SessionRegistry;

/// Matches requested per similarity query
pub const TOP_K: usize = 5;

/// Reply for an empty text turn
pub const EMPTY_QUERY_REPLY: &str = "Please enter a query.";

/// Reply when the index holds nothing relevant
pub const NO_MATCHES_REPLY: &str = "No relevant matches found for your query.";

/// Reply for commands the bot does not know
pub const UNKNOWN_COMMAND_REPLY: &str = "Unknown command. Send /start for an introduction.";

/// Reply for filename suffixes outside the supported set
pub const UNSUPPORTED_FORMAT_REPLY: &str =
    "Unsupported file type. I can index .pdf, .json, and .xml documents.";

/// Reply for parseable documents that carry nothing to index
pub const NO_TEXT_REPLY: &str = "The document has no text to vectorize.";

/// Dispatches inbound chat events to their handler chain
pub struct Router {
    embeddings: Arc<dyn Embeddings>,
    store: Arc<dyn VectorStore>,
    completions: Arc<dyn ChatCompletions>,
    files: Arc<dyn FileSource>,
    sessions: SessionRegistry,
}

impl Router {
    /// Create a router over the given service handles
    pub fn new(
        embeddings: Arc<dyn Embeddings>,
        store: Arc<dyn VectorStore>,
        completions: Arc<dyn ChatCompletions>,
        files: Arc<dyn FileSource>,
    ) -> Self {
        Self {
            embeddings,
            store,
            completions,
            files,
            sessions: SessionRegistry::new(),
        }
    }

    /// Session registry snapshot access (used by tests and diagnostics)
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Handle one inbound event, producing exactly one reply
    pub async fn handle(&self, event: InboundEvent) -> OutboundReply {
        tracing::info!(
            chat_id = event.chat_id,
            user_id = event.user_id,
            kind = event.kind_label(),
            "received event"
        );
        self.sessions.touch(event.user_id, event.chat_id);

        let text = match &event.kind {
            EventKind::Command(command) => self.handle_command(command),
            EventKind::Text(text) => self.handle_text(text).await,
            EventKind::Document { file_id, file_name } => {
                self.handle_document(file_id, file_name).await
            }
        };

        OutboundReply::new(event.chat_id, text)
    }

    fn handle_command(&self, command: &str) -> String {
        if command == "/start" {
            format!(
                "Hi! I'm ragbot v{}. Send me a question and I'll answer from the \
                 indexed documents, or upload a .pdf, .json, or .xml document \
                 (or a link to one) to index it.",
                env!("CARGO_PKG_VERSION")
            )
        } else {
            UNKNOWN_COMMAND_REPLY.to_string()
        }
    }

    async fn handle_text(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return EMPTY_QUERY_REPLY.to_string();
        }

        if looks_like_url(text) {
            let result = async {
                let payload = self.files.fetch_url(text).await?;
                self.index_document(text, payload).await
            }
            .await;
            return unwrap_reply(result, "index the linked document");
        }

        unwrap_reply(self.answer_query(text).await, "answer the query")
    }

    async fn handle_document(&self, file_id: &str, file_name: &str) -> String {
        let result = async {
            let payload = self.files.download_file(file_id).await?;
            self.index_document(file_name, payload).await
        }
        .await;
        unwrap_reply(result, "process the document")
    }

    async fn answer_query(&self, query: &str) -> Result<String> {
        let vector = self.embeddings.embed(query).await?;
        let matches = self.store.search(&vector, TOP_K).await?;

        if matches.is_empty() {
            return Ok(NO_MATCHES_REPLY.to_string());
        }

        let prompt = compose_prompt(query, &matches);
        self.completions.complete(ANSWER_SYSTEM_PROMPT, &prompt).await
    }

    async fn index_document(&self, name: &str, payload: Vec<u8>) -> Result<String> {
        let kind = DocumentKind::from_name(name);
        if kind == DocumentKind::Unknown {
            return Ok(UNSUPPORTED_FORMAT_REPLY.to_string());
        }

        let text = match decode(kind, payload).await? {
            DecodeOutcome::NoText => return Ok(NO_TEXT_REPLY.to_string()),
            DecodeOutcome::Text(text) => text,
        };

        let vector = self.embeddings.embed(&text).await?;

        let mut metadata = Metadata::new();
        metadata.insert(
            "source".to_string(),
            serde_json::Value::String(name.to_string()),
        );
        metadata.insert("text".to_string(), serde_json::Value::String(text));

        let id = self.store.upsert(vector, metadata).await?;
        tracing::info!(source = name, record = %id, "indexed document");

        Ok(format!("Indexed {} as record {}.", name, id))
    }
}

fn unwrap_reply(result: Result<String>, action: &str) -> String {
    match result {
        Ok(reply) => reply,
        Err(error @ Error::DocumentParse { .. }) => {
            tracing::warn!("document decode failed: {}", error);
            error.to_string()
        }
        Err(error) => {
            tracing::warn!("handler failed: {}", error);
            format!("Sorry, I could not {}: {}", action, error)
        }
    }
}
