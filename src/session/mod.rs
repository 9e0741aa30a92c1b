//! Conversation session management for Newschat
//!
//! This module owns the real state-machine logic of the client: the
//! in-memory session store, the message data model, and the controller
//! that orchestrates optimistic updates against the remote service.

pub mod controller;
pub mod message;
pub mod store;

pub use controller::{ConversationController, FALLBACK_BOT_REPLY};
pub use message::{next_message_id, Message, MessageStatus, Sender};
pub use store::{ChatSession, SessionStore};
