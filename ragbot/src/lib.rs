//! # ragbot
//!
//! The bot binary: wires the Telegram transport, OpenAI clients, and the
//! Pinecone index into the message router.

#![warn(missing_docs)]

pub mod router;
