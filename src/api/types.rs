//! Wire types for the chatbot service API
//!
//! Request and response bodies exchanged with the remote service. The
//! service speaks camelCase JSON.

use serde::{Deserialize, Serialize};

/// Response from POST /session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    /// Opaque identifier of the newly created session
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Request body for POST /chat
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub query: String,
}

/// Response from POST /chat
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Bot answer text for the submitted query
    pub response: String,
}

/// Response from GET /history/{sessionId}
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    /// Ordered conversation history, oldest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// One turn of stored conversation history
///
/// `role` mirrors the service's vocabulary ("system", "user", "assistant",
/// ...). Entries with role "system" are internal prompt plumbing and are
/// dropped before display. `timestamp` is epoch milliseconds and may be
/// absent for older records.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Request body for POST /ingest
#[derive(Debug, Clone, Serialize)]
pub struct IngestRequest {
    pub query: String,
}

/// Response from POST /ingest
#[derive(Debug, Clone, Deserialize)]
pub struct IngestResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
