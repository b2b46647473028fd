//! Per-user chat session registry
//!
//! Sessions are created on first interaction and live for the lifetime of the
//! process; nothing ever destroys them. The registry is a concurrent map, so
//! handlers running on different tasks can touch sessions without extra
//! locking.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// State tracked for one chatting user
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Chat the user converses in
    pub chat_id: i64,
    /// When the user first interacted
    pub started_at: DateTime<Utc>,
    /// Last time any event arrived from this user
    pub last_seen: DateTime<Utc>,
}

/// Process-lifetime registry of chat sessions, keyed by user identifier
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<i64, ChatSession>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an interaction, creating the session on first contact
    pub fn touch(&self, user_id: i64, chat_id: i64) {
        let now = Utc::now();
        self.sessions
            .entry(user_id)
            .and_modify(|s| s.last_seen = now)
            .or_insert_with(|| ChatSession {
                chat_id,
                started_at: now,
                last_seen: now,
            });
    }

    /// Look up a session snapshot by user id
    pub fn get(&self, user_id: i64) -> Option<ChatSession> {
        self.sessions.get(&user_id).map(|s| s.clone())
    }

    /// Number of known sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no user has interacted yet
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_creates_session() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty());

        registry.touch(42, 100);
        assert_eq!(registry.len(), 1);

        let session = registry.get(42).unwrap();
        assert_eq!(session.chat_id, 100);
        assert_eq!(session.started_at, session.last_seen);
    }

    #[test]
    fn test_touch_updates_last_seen() {
        let registry = SessionRegistry::new();
        registry.touch(42, 100);
        let first = registry.get(42).unwrap();

        registry.touch(42, 100);
        let second = registry.get(42).unwrap();

        assert_eq!(first.started_at, second.started_at);
        assert!(second.last_seen >= first.last_seen);
    }

    #[test]
    fn test_unknown_user() {
        let registry = SessionRegistry::new();
        assert!(registry.get(7).is_none());
    }
}
