//! Content ingestion command
//!
//! One-shot submission of content to the retrieval index. Shares the
//! transport and error contract with the chat operations.

use crate::api::{ChatService, HttpChatService};
use crate::config::Config;
use crate::error::{ApiError, NewschatError, Result};

use colored::Colorize;

/// Submit text for ingestion and report the outcome
pub async fn run_ingest(config: Config, text: &str) -> Result<()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        println!("{}", "Nothing to ingest.".yellow());
        return Ok(());
    }

    let service = HttpChatService::new(&config.api)?;

    match service.ingest(trimmed).await {
        Ok(response) if response.success => {
            let message = response
                .message
                .unwrap_or_else(|| "Content ingested.".to_string());
            println!("{}", message.green());
            Ok(())
        }
        Ok(response) => {
            let message = response
                .message
                .unwrap_or_else(|| "Ingestion was rejected by the service.".to_string());
            println!("{}", format!("error: {}", message).red());
            Err(NewschatError::Api(ApiError::message(message)).into())
        }
        Err(err) => {
            println!("{}", format!("error: {}", err.message).red());
            Err(NewschatError::Api(err).into())
        }
    }
}
