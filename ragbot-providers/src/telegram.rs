//! Telegram transport: long polling, replies, file download
//!
//! One client instance serves the whole process. `poll` turns raw updates
//! into `InboundEvent`s; unrecognized update shapes are skipped. The client
//! also implements `FileSource` for attached documents and user-supplied
//! URLs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use ragbot_core::event::{EventKind, InboundEvent};

use crate::{Error, FileSource, HttpConfig, Result};

const API_BASE: &str = "https://api.telegram.org";
const POLL_TIMEOUT_SECS: u64 = 30;

/// Telegram Bot API client
#[derive(Clone)]
pub struct Telegram {
    client: reqwest::Client,
    token: String,
}

/// One round of long polling: parsed events plus the next update offset
#[derive(Debug)]
pub struct Polled {
    /// Offset to pass to the next `poll` call
    pub next_offset: i64,
    /// Recognized events, in arrival order
    pub events: Vec<InboundEvent>,
}

impl Telegram {
    /// Create a new client from a bot token
    pub fn new(token: impl Into<String>) -> Result<Self> {
        // Long poll holds the connection open for POLL_TIMEOUT_SECS; the
        // request timeout must exceed it.
        let config = HttpConfig {
            timeout_secs: POLL_TIMEOUT_SECS + 30,
            ..HttpConfig::default()
        };
        Ok(Self {
            client: config.build_client()?,
            token: token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    /// Long-poll for updates past `offset`
    pub async fn poll(&self, offset: i64) -> Result<Polled> {
        let response = self
            .client
            .get(self.method_url("getUpdates"))
            .query(&[
                ("timeout", POLL_TIMEOUT_SECS.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "getUpdates failed: {} {}",
                status, text
            )));
        }

        let body: UpdatesResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Failed to parse updates: {}", e)))?;

        let mut next_offset = offset;
        let mut events = Vec::new();
        for update in body.result {
            next_offset = next_offset.max(update.update_id + 1);
            match update.into_event() {
                Some(event) => events.push(event),
                None => tracing::debug!("skipping unrecognized update shape"),
            }
        }

        Ok(Polled {
            next_offset,
            events,
        })
    }

    /// Send a text reply to a chat
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let payload = json!({
            "chat_id": chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "sendMessage failed: {} {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<TgMessage>,
}

#[derive(Debug, Deserialize)]
struct TgMessage {
    chat: TgChat,
    from: Option<TgUser>,
    text: Option<String>,
    document: Option<TgDocument>,
}

#[derive(Debug, Deserialize)]
struct TgChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TgUser {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TgDocument {
    file_id: String,
    file_name: Option<String>,
}

impl Update {
    fn into_event(self) -> Option<InboundEvent> {
        let message = self.message?;
        let chat_id = message.chat.id;
        let user_id = message.from.map(|u| u.id).unwrap_or(chat_id);

        let kind = if let Some(document) = message.document {
            EventKind::Document {
                file_id: document.file_id,
                file_name: document.file_name.unwrap_or_else(|| "document".to_string()),
            }
        } else if let Some(text) = message.text {
            if text.starts_with('/') {
                EventKind::Command(text)
            } else {
                EventKind::Text(text)
            }
        } else {
            return None;
        };

        Some(InboundEvent::new(chat_id, user_id, kind))
    }
}

#[derive(Debug, Deserialize)]
struct FileResponse {
    result: TgFile,
}

#[derive(Debug, Deserialize)]
struct TgFile {
    file_path: Option<String>,
}

#[async_trait]
impl FileSource for Telegram {
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.method_url("getFile"))
            .query(&[("file_id", file_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "getFile failed: {} {}",
                status, body
            )));
        }

        let body: FileResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Failed to parse getFile response: {}", e)))?;

        let file_path = body
            .result
            .file_path
            .ok_or_else(|| Error::Transport("getFile returned no file_path".to_string()))?;

        let url = format!("{}/file/bot{}/{}", API_BASE, self.token, file_path);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "file download failed: {}",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_url(&self, raw_url: &str) -> Result<Vec<u8>> {
        let parsed = url::Url::parse(raw_url)
            .map_err(|e| Error::Transport(format!("invalid document URL: {}", e)))?;

        let response = self.client.get(parsed).send().await?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "document fetch failed: {}",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_update(body: &str) -> Update {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_command_update() {
        let update = parse_update(
            r#"{"update_id": 1, "message": {"chat": {"id": 10}, "from": {"id": 20}, "text": "/start"}}"#,
        );
        let event = update.into_event().unwrap();
        assert_eq!(event.chat_id, 10);
        assert_eq!(event.user_id, 20);
        assert_eq!(event.kind, EventKind::Command("/start".to_string()));
    }

    #[test]
    fn test_text_update() {
        let update = parse_update(
            r#"{"update_id": 2, "message": {"chat": {"id": 10}, "from": {"id": 20}, "text": "hello"}}"#,
        );
        let event = update.into_event().unwrap();
        assert_eq!(event.kind, EventKind::Text("hello".to_string()));
    }

    #[test]
    fn test_document_update() {
        let update = parse_update(
            r#"{"update_id": 3, "message": {"chat": {"id": 10}, "from": {"id": 20},
                "document": {"file_id": "F123", "file_name": "catalog.xml"}}}"#,
        );
        let event = update.into_event().unwrap();
        assert_eq!(
            event.kind,
            EventKind::Document {
                file_id: "F123".to_string(),
                file_name: "catalog.xml".to_string(),
            }
        );
    }

    #[test]
    fn test_document_takes_priority_over_caption_text() {
        let update = parse_update(
            r#"{"update_id": 4, "message": {"chat": {"id": 10}, "from": {"id": 20},
                "text": "caption", "document": {"file_id": "F1", "file_name": "a.pdf"}}}"#,
        );
        let event = update.into_event().unwrap();
        assert!(matches!(event.kind, EventKind::Document { .. }));
    }

    #[test]
    fn test_unrecognized_update_is_skipped() {
        let update = parse_update(r#"{"update_id": 5, "message": {"chat": {"id": 10}}}"#);
        assert!(update.into_event().is_none());

        let update = parse_update(r#"{"update_id": 6}"#);
        assert!(update.into_event().is_none());
    }

    #[test]
    fn test_missing_sender_falls_back_to_chat() {
        let update = parse_update(
            r#"{"update_id": 7, "message": {"chat": {"id": 99}, "text": "hi"}}"#,
        );
        let event = update.into_event().unwrap();
        assert_eq!(event.user_id, 99);
    }
}
