//! Inbound and outbound chat event types
//!
//! Each inbound event is handled independently; there is no queueing or
//! backpressure between events. A burst of concurrent uploads results in one
//! fully independent handler chain per event.

use serde::{Deserialize, Serialize};

/// Shape of an inbound chat event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A bot command, e.g. "/start"
    Command(String),
    /// Free-form text (a query, or a URL pointing at a document)
    Text(String),
    /// An attached document with a transport file identifier
    Document {
        /// Transport-specific file identifier used to download the payload
        file_id: String,
        /// Original filename, used for format classification
        file_name: String,
    },
}

/// An inbound event from the chat transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Chat the event originated from
    pub chat_id: i64,
    /// Sending user
    pub user_id: i64,
    /// Event payload
    pub kind: EventKind,
}

impl InboundEvent {
    /// Create a new inbound event
    pub fn new(chat_id: i64, user_id: i64, kind: EventKind) -> Self {
        Self {
            chat_id,
            user_id,
            kind,
        }
    }

    /// Short label for logging
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            EventKind::Command(_) => "command",
            EventKind::Text(_) => "text",
            EventKind::Document { .. } => "document",
        }
    }
}

/// A reply destined for the chat transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundReply {
    /// Target chat
    pub chat_id: i64,
    /// Reply text
    pub text: String,
}

impl OutboundReply {
    /// Create a new outbound reply
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_label() {
        let event = InboundEvent::new(1, 2, EventKind::Command("/start".into()));
        assert_eq!(event.kind_label(), "command");

        let event = InboundEvent::new(
            1,
            2,
            EventKind::Document {
                file_id: "abc".into(),
                file_name: "catalog.xml".into(),
            },
        );
        assert_eq!(event.kind_label(), "document");
    }
}
