//! In-memory session store
//!
//! Single source of truth for the current chat session. Only the
//! conversation controller mutates it; everything else reads snapshots.

use crate::session::message::Message;
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Snapshot of the current chat session
///
/// An empty `session_id` means "no active session"; no message send is
/// permitted in that state. `messages` is an append-only log in display
/// order. `error` is the last unrecovered session-level error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatSession {
    pub session_id: String,
    pub messages: Vec<Message>,
    pub error: Option<String>,
}

impl ChatSession {
    /// True once a session has been created or restored
    pub fn is_active(&self) -> bool {
        !self.session_id.is_empty()
    }
}

/// Owned, shareable container for session state
///
/// All mutations funnel through the small primitive set below; there are no
/// ad hoc shared variables. Operations are synchronous in-memory updates
/// and never block on IO. Cloning the store shares the underlying state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<ChatSession>>,
}

impl SessionStore {
    /// Create an empty store with no active session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session snapshot
    pub fn get(&self) -> ChatSession {
        self.inner
            .read()
            .map(|session| session.clone())
            .unwrap_or_default()
    }

    /// Current session identifier (empty when no session is active)
    pub fn session_id(&self) -> String {
        self.inner
            .read()
            .map(|session| session.session_id.clone())
            .unwrap_or_default()
    }

    /// Install a session identifier, clearing messages and error
    ///
    /// Used both for freshly created sessions and before bulk-installing
    /// restored history.
    pub fn set_session_id(&self, session_id: impl Into<String>) {
        if let Ok(mut session) = self.inner.write() {
            session.session_id = session_id.into();
            session.messages.clear();
            session.error = None;
        } else {
            tracing::error!("Session store lock poisoned; set_session_id dropped");
        }
    }

    /// Append one message to the log
    ///
    /// Never reorders or mutates existing entries.
    pub fn append_message(&self, message: Message) {
        if let Ok(mut session) = self.inner.write() {
            session.messages.push(message);
        } else {
            tracing::error!("Session store lock poisoned; append_message dropped");
        }
    }

    /// Append a batch of messages in order (used for history restore)
    pub fn append_messages(&self, messages: Vec<Message>) {
        if let Ok(mut session) = self.inner.write() {
            session.messages.extend(messages);
        } else {
            tracing::error!("Session store lock poisoned; append_messages dropped");
        }
    }

    /// Record or clear the session-level error
    ///
    /// Independent of per-message status; a failed round trip sets both.
    pub fn set_error(&self, error: Option<String>) {
        if let Ok(mut session) = self.inner.write() {
            session.error = error;
        } else {
            tracing::error!("Session store lock poisoned; set_error dropped");
        }
    }

    /// Reset to the empty, no-session state
    pub fn clear(&self) {
        if let Ok(mut session) = self.inner.write() {
            *session = ChatSession::default();
        } else {
            tracing::error!("Session store lock poisoned; clear dropped");
        }
    }

    /// Look up a message by id
    pub fn find_message(&self, message_id: &str) -> Option<Message> {
        self.inner
            .read()
            .ok()
            .and_then(|session| session.messages.iter().find(|m| m.id == message_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::{MessageStatus, Sender};

    #[test]
    fn test_new_store_is_inactive() {
        let store = SessionStore::new();
        let session = store.get();
        assert!(!session.is_active());
        assert!(session.messages.is_empty());
        assert!(session.error.is_none());
    }

    #[test]
    fn test_set_session_id_clears_messages_and_error() {
        let store = SessionStore::new();
        store.append_message(Message::user("hello"));
        store.set_error(Some("boom".to_string()));

        store.set_session_id("abc123");

        let session = store.get();
        assert_eq!(session.session_id, "abc123");
        assert!(session.messages.is_empty());
        assert!(session.error.is_none());
        assert!(session.is_active());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let store = SessionStore::new();
        store.append_message(Message::user("first"));
        store.append_message(Message::bot("second"));
        store.append_message(Message::user("third"));

        let session = store.get();
        let contents: Vec<&str> = session.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_append_messages_bulk() {
        let store = SessionStore::new();
        store.set_session_id("abc123");
        store.append_messages(vec![Message::user("a"), Message::bot("b")]);

        let session = store.get();
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].sender, Sender::User);
        assert_eq!(session.messages[1].sender, Sender::Bot);
    }

    #[test]
    fn test_set_error_independent_of_messages() {
        let store = SessionStore::new();
        store.append_message(Message::bot_error("placeholder"));
        store.set_error(Some("Request timeout. Please try again.".to_string()));

        let session = store.get();
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].status, MessageStatus::Error);
        assert_eq!(
            session.error.as_deref(),
            Some("Request timeout. Please try again.")
        );

        store.set_error(None);
        assert!(store.get().error.is_none());
        assert_eq!(store.get().messages.len(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let store = SessionStore::new();
        store.set_session_id("abc123");
        store.append_message(Message::user("hello"));
        store.set_error(Some("boom".to_string()));

        store.clear();

        let session = store.get();
        assert_eq!(session.session_id, "");
        assert!(session.messages.is_empty());
        assert!(session.error.is_none());
    }

    #[test]
    fn test_find_message_by_id() {
        let store = SessionStore::new();
        let message = Message::user("find me");
        let id = message.id.clone();
        store.append_message(message);

        let found = store.find_message(&id).expect("message present");
        assert_eq!(found.content, "find me");
        assert!(store.find_message("missing").is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let clone = store.clone();
        store.set_session_id("abc123");
        assert_eq!(clone.session_id(), "abc123");
    }
}
