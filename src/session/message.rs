//! Message data model
//!
//! One `Message` per conversation turn. The log is append-only: messages
//! are never mutated or removed individually, only wiped together with the
//! session.

use crate::api::types::HistoryEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Delivery state of a message
///
/// `Sending` and `Error` only apply to bot-side placeholders representing a
/// pending or failed round trip. Restored messages are always `Sent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sending,
    Sent,
    Error,
}

/// One turn in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier unique within the session, derived from a millisecond
    /// timestamp at creation time (best-effort, not cryptographic)
    pub id: String,
    /// UTF-8 message text
    pub content: String,
    /// Originating side of the turn
    pub sender: Sender,
    /// Creation time (client-side) or service-reported time (restored)
    pub timestamp: DateTime<Utc>,
    /// Delivery state
    pub status: MessageStatus,
}

impl Message {
    /// Create a user message, immediately considered sent
    ///
    /// The user side of a round trip is never rolled back; failures are
    /// represented by the paired bot message instead.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: next_message_id(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            status: MessageStatus::Sent,
        }
    }

    /// Create a bot message for a successful response
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            id: next_message_id(),
            content: content.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            status: MessageStatus::Sent,
        }
    }

    /// Create a bot placeholder for a failed round trip
    pub fn bot_error(content: impl Into<String>) -> Self {
        Self {
            id: next_message_id(),
            content: content.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            status: MessageStatus::Error,
        }
    }

    /// Map one stored history entry into a displayable message
    ///
    /// Returns `None` for `system` entries, which are prompt plumbing and
    /// excluded from the log. Role "user" maps to [`Sender::User`]; any
    /// other role maps to [`Sender::Bot`]. Restored messages are always
    /// `Sent`. The id comes from the entry's reported time, falling back to
    /// a locally generated one when absent.
    pub fn from_history_entry(entry: &HistoryEntry) -> Option<Self> {
        if entry.role == "system" {
            return None;
        }

        let sender = if entry.role == "user" {
            Sender::User
        } else {
            Sender::Bot
        };

        let (id, timestamp) = match entry
            .timestamp
            .and_then(DateTime::<Utc>::from_timestamp_millis)
        {
            Some(ts) => (ts.timestamp_millis().to_string(), ts),
            None => (next_message_id(), Utc::now()),
        };

        Some(Self {
            id,
            content: entry.content.clone(),
            sender,
            timestamp,
            status: MessageStatus::Sent,
        })
    }
}

// Last issued id, used to keep ids strictly increasing when several
// messages are created within the same millisecond.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generate a message id from the current millisecond timestamp
///
/// Ids are strictly increasing within the process; collision avoidance is
/// best-effort, not cryptographically unique.
pub fn next_message_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(prev + 1);
        match LAST_ID.compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return candidate.to_string(),
            Err(observed) => prev = observed,
        }
    }
}
