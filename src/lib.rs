//! Newschat - chat client library for a retrieval-augmented chatbot service
//!
//! This library provides the client-side conversation session manager:
//! creating and restoring sessions, sending messages with optimistic
//! updates, reconciling server responses, and persisting session identity
//! across restarts.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Remote service contract and HTTP implementation
//! - `session`: Session store, message model, and conversation controller
//! - `storage`: Durable session pointer (embedded key-value store)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use newschat::api::HttpChatService;
//! use newschat::config::Config;
//! use newschat::session::{ConversationController, SessionStore};
//! use newschat::storage::SessionPointer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let service = Arc::new(HttpChatService::new(&config.api)?);
//!     let pointer = SessionPointer::new()?;
//!     let controller = ConversationController::new(service, SessionStore::new(), pointer);
//!
//!     if !controller.restore_session().await? {
//!         controller.create_session().await?;
//!     }
//!     controller.send_message("What happened today?").await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use api::{ChatService, HttpChatService};
pub use config::Config;
pub use error::{ApiError, NewschatError, Result};
pub use session::{ChatSession, ConversationController, Message, MessageStatus, Sender, SessionStore};
pub use storage::SessionPointer;
