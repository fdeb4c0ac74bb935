//! One-shot flash messages keyed by session.
//!
//! A write handler sets a message, redirects, and the page rendered for the
//! redirect consumes it. Reading clears the entry under the same lock, so a
//! message is delivered at most once.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::session::SessionId;

/// Key used for the single user-facing status message.
pub const FLASH_KEY: &str = "msg";

#[derive(Debug)]
struct FlashEntry {
    message: String,
    expires_at: Instant,
}

/// Per-session store of pending flash messages.
#[derive(Debug)]
pub struct FlashChannel {
    entries: Mutex<HashMap<(SessionId, String), FlashEntry>>,
    ttl: Duration,
}

impl FlashChannel {
    /// Create a channel whose undelivered messages expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Store `message` under `key` for `session`, replacing any pending one.
    pub async fn set(&self, session: SessionId, key: &str, message: impl Into<String>) {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            (session, key.to_string()),
            FlashEntry {
                message: message.into(),
                expires_at: now + self.ttl,
            },
        );
    }

    /// Take the pending message under `key` for `session`, if any.
    pub async fn consume(&self, session: SessionId, key: &str) -> Option<String> {
        let entry = self
            .entries
            .lock()
            .await
            .remove(&(session, key.to_string()))?;
        (entry.expires_at > Instant::now()).then_some(entry.message)
    }

    /// Number of undelivered messages, expired ones included.
    pub async fn pending(&self) -> usize {
        self.entries.lock().await.len()
    }
}
