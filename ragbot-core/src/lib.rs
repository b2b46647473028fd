//! # ragbot-core
//!
//! Core types, traits, and abstractions for the ragbot assistant.
//!
//! This crate provides:
//! - Error type (`error`) - unified error handling
//! - Configuration (`config`) - environment-sourced settings
//! - Logging (`logging`) - tracing initialization with rotation
//! - Chat events (`event`) - inbound/outbound message shapes
//! - Sessions (`session`) - per-user chat session registry
//! - Documents (`document`) - format classification and text extraction
//! - Retrieval seams (`retrieval`) - embedding / vector store / completion traits
//! - Prompt composition (`compose`) - context assembly for answers

#![warn(missing_docs)]

pub mod compose;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod logging;
pub mod retrieval;
pub mod session;

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::compose::{compose_prompt, ANSWER_SYSTEM_PROMPT};
    pub use crate::config::Config;
    pub use crate::document::{decode, DecodeOutcome, DocumentKind};
    pub use crate::error::{Error, Result};
    pub use crate::event::{EventKind, InboundEvent, OutboundReply};
    pub use crate::retrieval::{ChatCompletions, Embeddings, FileSource, SearchMatch, VectorStore};
    pub use crate::session::SessionRegistry;
}
