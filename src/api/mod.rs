//! Remote chatbot service client for Newschat
//!
//! This module contains the abstract service contract (`ChatService`) and
//! the reqwest-based HTTP implementation. All failures cross this boundary
//! as normalized [`ApiError`](crate::error::ApiError) values.

pub mod client;
pub mod types;

pub use client::HttpChatService;
pub use types::{HistoryEntry, HistoryResponse, IngestResponse, QueryResponse, SessionResponse};

use crate::error::ApiError;
use async_trait::async_trait;

/// Result type for remote service calls
///
/// Service methods fail with a normalized [`ApiError`] rather than the
/// crate-wide `anyhow` alias so that callers can store the user-presentable
/// message in session state without downcasting.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Abstract contract with the remote retrieval-augmented chatbot service
///
/// The session controller depends on this trait rather than a concrete
/// client, which keeps the transport swappable and the controller testable
/// against mock servers.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Create a new server-side session (POST /session)
    async fn create_session(&self) -> ApiResult<SessionResponse>;

    /// Fetch the ordered history of an existing session (GET /history/{id})
    async fn fetch_history(&self, session_id: &str) -> ApiResult<HistoryResponse>;

    /// Send one user query and obtain the bot response (POST /chat)
    async fn send_query(&self, session_id: &str, query: &str) -> ApiResult<QueryResponse>;

    /// Delete the server-side history of a session (DELETE /history/{id})
    async fn delete_history(&self, session_id: &str) -> ApiResult<()>;

    /// Submit content for ingestion into the retrieval index (POST /ingest)
    async fn ingest(&self, query: &str) -> ApiResult<IngestResponse>;
}
