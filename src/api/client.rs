//! HTTP implementation of the chatbot service contract
//!
//! Connects to the remote retrieval-augmented chatbot service over JSON
//! HTTP. Every failure is normalized here, once, into an [`ApiError`] with
//! a user-presentable message; callers never see raw transport errors.

use crate::api::types::{
    HistoryResponse, IngestRequest, IngestResponse, QueryRequest, QueryResponse, SessionResponse,
};
use crate::api::{ApiResult, ChatService};
use crate::config::ApiConfig;
use crate::error::{ApiError, NewschatError, Result};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Message used when a request times out or the service is unreachable
pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please try again.";

/// Message used when the service endpoint does not exist (HTTP 404)
pub const NOT_FOUND_MESSAGE: &str = "Service not found. Please check your connection.";

/// Message used when the service fails internally (HTTP 500)
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

/// Fallback message when no more specific cause is known
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// HTTP client for the chatbot service
///
/// # Examples
///
/// ```no_run
/// use newschat::api::{ChatService, HttpChatService};
/// use newschat::config::ApiConfig;
///
/// # async fn example() -> newschat::error::Result<()> {
/// let config = ApiConfig {
///     base_url: "https://chat.example.com".to_string(),
///     timeout_seconds: 300,
/// };
/// let service = HttpChatService::new(&config)?;
/// let session = service.create_session().await?;
/// println!("session: {}", session.session_id);
/// # Ok(())
/// # }
/// ```
pub struct HttpChatService {
    client: Client,
    base_url: String,
}

impl HttpChatService {
    /// Create a new service client from API configuration
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("newschat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                NewschatError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized chat service client: base_url={}, timeout={}s",
            config.base_url,
            config.timeout_seconds
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and normalize any failure, expecting a JSON body
    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ApiResult<T> {
        let response = self.checked_response(request).await?;
        let status = response.status();
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse service response: {}", e);
            ApiError {
                message: format!("Failed to parse service response: {}", e),
                status: Some(status.as_u16()),
                details: None,
            }
        })
    }

    /// Send a request and normalize any failure, discarding the body
    async fn execute_discard(&self, request: reqwest::RequestBuilder) -> ApiResult<()> {
        self.checked_response(request).await.map(|_| ())
    }

    async fn checked_response(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<reqwest::Response> {
        let response = request.send().await.map_err(normalize_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Service returned error {}: {}", status, body);
            return Err(normalize_status_error(status, &body));
        }

        Ok(response)
    }
}

/// Normalize a reqwest error into the shared error shape
///
/// Timeouts and connection failures map to the fixed timeout message;
/// anything else falls back to the transport's own description or the
/// generic message when none exists.
fn normalize_transport_error(err: reqwest::Error) -> ApiError {
    let status = err.status().map(|s| s.as_u16());

    let message = if err.is_timeout() || err.is_connect() {
        TIMEOUT_MESSAGE.to_string()
    } else {
        let raw = err.to_string();
        if raw.is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            raw
        }
    };

    tracing::debug!("Normalized transport error: {}", message);
    ApiError {
        message,
        status,
        details: None,
    }
}

/// Normalize a non-success HTTP response into the shared error shape
///
/// Precedence: 404 and 500 map to fixed messages, then a server-supplied
/// `message` field in the body, then the generic fallback. The raw body is
/// preserved in `details` when it parses as JSON.
fn normalize_status_error(status: StatusCode, body: &str) -> ApiError {
    let details: Option<serde_json::Value> = serde_json::from_str(body).ok();

    let message = match status {
        StatusCode::NOT_FOUND => NOT_FOUND_MESSAGE.to_string(),
        StatusCode::INTERNAL_SERVER_ERROR => SERVER_ERROR_MESSAGE.to_string(),
        _ => details
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
    };

    ApiError {
        message,
        status: Some(status.as_u16()),
        details,
    }
}

#[async_trait]
impl ChatService for HttpChatService {
    async fn create_session(&self) -> ApiResult<SessionResponse> {
        tracing::debug!("Creating chat session");
        self.execute(self.client.post(self.url("/session"))).await
    }

    async fn fetch_history(&self, session_id: &str) -> ApiResult<HistoryResponse> {
        tracing::debug!(session_id = %session_id, "Fetching session history");
        self.execute(
            self.client
                .get(self.url(&format!("/history/{}", session_id))),
        )
        .await
    }

    async fn send_query(&self, session_id: &str, query: &str) -> ApiResult<QueryResponse> {
        tracing::debug!(session_id = %session_id, "Sending chat query");
        let request = QueryRequest {
            session_id: session_id.to_string(),
            query: query.to_string(),
        };
        self.execute(self.client.post(self.url("/chat")).json(&request))
            .await
    }

    async fn delete_history(&self, session_id: &str) -> ApiResult<()> {
        tracing::debug!(session_id = %session_id, "Deleting session history");
        self.execute_discard(
            self.client
                .delete(self.url(&format!("/history/{}", session_id))),
        )
        .await
    }

    async fn ingest(&self, query: &str) -> ApiResult<IngestResponse> {
        tracing::debug!("Submitting content for ingestion");
        let request = IngestRequest {
            query: query.to_string(),
        };
        self.execute(self.client.post(self.url("/ingest")).json(&request))
            .await
    }
}
