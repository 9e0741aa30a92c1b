//! Conversation controller
//!
//! Orchestrates the user-triggered session operations: each one is a short
//! sequence of store mutations interleaved with a single remote call.
//! Updates are optimistic: the user message lands in the log before the
//! round trip, and failure is reconciled by appending a paired bot error
//! message rather than rolling anything back.

use crate::api::ChatService;
use crate::error::{NewschatError, Result};
use crate::session::message::{Message, Sender};
use crate::session::store::{ChatSession, SessionStore};
use crate::storage::SessionPointer;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Text shown in place of a bot reply when a round trip fails
pub const FALLBACK_BOT_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Orchestrator for the session lifecycle and message round trips
///
/// Clones share all state, so a controller can be handed to concurrent
/// tasks. Overlapping sends are permitted: each is tagged with a sequence
/// number, and the resulting bot messages land in completion order, not
/// issuance order.
#[derive(Clone)]
pub struct ConversationController {
    service: Arc<dyn ChatService>,
    store: SessionStore,
    pointer: SessionPointer,
    typing: Arc<AtomicBool>,
    send_seq: Arc<AtomicU64>,
}

impl ConversationController {
    /// Create a controller over a service client, store, and durable pointer
    pub fn new(service: Arc<dyn ChatService>, store: SessionStore, pointer: SessionPointer) -> Self {
        Self {
            service,
            store,
            pointer,
            typing: Arc::new(AtomicBool::new(false)),
            send_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current session snapshot, for rendering
    pub fn session(&self) -> ChatSession {
        self.store.get()
    }

    /// The underlying store (read access for collaborators)
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// True while a query round trip is outstanding
    ///
    /// A boolean, not a counter: with overlapping sends the flag clears
    /// when any of them settles, matching the single typing indicator the
    /// UI shows.
    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::SeqCst)
    }

    /// Create a new server-side session and make it current
    ///
    /// On success the durable pointer and the store both point at the new
    /// session. On failure the session state is left unchanged apart from
    /// the recorded error, and the error is returned so the caller can
    /// offer a retry.
    pub async fn create_session(&self) -> Result<String> {
        match self.service.create_session().await {
            Ok(response) => {
                self.pointer.store(&response.session_id)?;
                self.store.set_session_id(&response.session_id);
                tracing::info!(session_id = %response.session_id, "Created chat session");
                Ok(response.session_id)
            }
            Err(err) => {
                tracing::warn!("Session creation failed: {}", err.message);
                self.store.set_error(Some(err.message.clone()));
                Err(NewschatError::Api(err).into())
            }
        }
    }

    /// Restore the session named by the durable pointer, if any
    ///
    /// Returns `Ok(false)` when no pointer exists. On fetch failure the
    /// error is recorded on the session and returned, but the pointer is
    /// kept so a reload or manual retry can still restore later.
    pub async fn restore_session(&self) -> Result<bool> {
        let session_id = match self.pointer.load()? {
            Some(id) => id,
            None => return Ok(false),
        };

        match self.service.fetch_history(&session_id).await {
            Ok(response) => {
                let messages: Vec<Message> = response
                    .history
                    .iter()
                    .filter_map(Message::from_history_entry)
                    .collect();
                tracing::info!(
                    session_id = %session_id,
                    restored = messages.len(),
                    "Restored chat session"
                );
                self.store.set_session_id(&session_id);
                self.store.append_messages(messages);
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(session_id = %session_id, "History restore failed: {}", err.message);
                self.store.set_error(Some(err.message.clone()));
                Err(NewschatError::Api(err).into())
            }
        }
    }

    /// Send one user message and reconcile with the bot response
    ///
    /// No-op when the trimmed text is empty or no session is active. The
    /// user message is appended synchronously before the round trip and is
    /// never rolled back; a failed round trip appends a bot placeholder
    /// with [`FALLBACK_BOT_REPLY`] and records the normalized cause as the
    /// session error. The typing flag always clears once the call settles.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let session_id = self.store.session_id();
        if session_id.is_empty() {
            tracing::debug!("send_message ignored: no active session");
            return Ok(());
        }

        self.store.append_message(Message::user(trimmed));
        self.store.set_error(None);
        self.typing.store(true, Ordering::SeqCst);

        let seq = self.send_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(seq, session_id = %session_id, "Query round trip started");

        let result = self.service.send_query(&session_id, trimmed).await;
        self.typing.store(false, Ordering::SeqCst);

        // The session may have been deleted or replaced while the call was
        // in flight; a stale response must not touch the new state.
        if self.store.session_id() != session_id {
            tracing::debug!(seq, "Discarding response for superseded session");
            return Ok(());
        }

        match result {
            Ok(response) => {
                tracing::debug!(seq, "Query round trip resolved");
                self.store.append_message(Message::bot(response.response));
            }
            Err(err) => {
                tracing::warn!(seq, "Query round trip failed: {}", err.message);
                self.store.append_message(Message::bot_error(FALLBACK_BOT_REPLY));
                self.store.set_error(Some(err.message));
            }
        }

        Ok(())
    }

    /// Delete the server-side history and reset local state
    ///
    /// No-op when no session is active. On failure the session is left
    /// intact (nothing partially clears), the error is recorded, and the
    /// error is returned so the caller can retry the delete.
    pub async fn delete_history(&self) -> Result<()> {
        let session_id = self.store.session_id();
        if session_id.is_empty() {
            return Ok(());
        }

        match self.service.delete_history(&session_id).await {
            Ok(()) => {
                self.pointer.clear()?;
                self.store.clear();
                tracing::info!(session_id = %session_id, "Deleted chat session");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(session_id = %session_id, "History delete failed: {}", err.message);
                self.store.set_error(Some(err.message.clone()));
                Err(NewschatError::Api(err).into())
            }
        }
    }

    /// Re-send the content of an earlier user message
    ///
    /// No-op when the id is unknown or names a bot message. This creates a
    /// new user message and a new round trip; the failed bot placeholder
    /// stays visible as history.
    pub async fn retry_message(&self, message_id: &str) -> Result<()> {
        let message = match self.store.find_message(message_id) {
            Some(m) => m,
            None => {
                tracing::debug!(message_id = %message_id, "retry_message ignored: unknown id");
                return Ok(());
            }
        };

        if message.sender != Sender::User {
            tracing::debug!(message_id = %message_id, "retry_message ignored: not a user message");
            return Ok(());
        }

        self.send_message(&message.content).await
    }
}
