//! History management command
//!
//! Shows or deletes the history of the session named by the durable
//! pointer.

use crate::api::HttpChatService;
use crate::cli::HistoryCommand;
use crate::config::Config;
use crate::error::Result;
use crate::session::{ConversationController, MessageStatus, Sender, SessionStore};
use crate::storage::SessionPointer;

use colored::Colorize;
use std::sync::Arc;

/// Handle history subcommands
pub async fn handle_history(config: Config, command: HistoryCommand) -> Result<()> {
    let service = Arc::new(HttpChatService::new(&config.api)?);
    let pointer = SessionPointer::new()?;
    let controller =
        ConversationController::new(service, SessionStore::new(), pointer.clone());

    match command {
        HistoryCommand::Show => {
            if !controller.restore_session().await? {
                println!("{}", "No stored session.".yellow());
                return Ok(());
            }

            let session = controller.session();
            if session.messages.is_empty() {
                println!(
                    "{}",
                    format!("Session {} has no messages yet.", session.session_id).yellow()
                );
                return Ok(());
            }

            println!("\nSession {}:", session.session_id.cyan());
            for message in &session.messages {
                let when = message.timestamp.format("%Y-%m-%d %H:%M").to_string();
                let label = match (message.sender, message.status) {
                    (Sender::User, _) => "you".cyan().bold(),
                    (Sender::Bot, MessageStatus::Error) => "bot".red().bold(),
                    (Sender::Bot, _) => "bot".green().bold(),
                };
                println!("{} {} {}", when.dimmed(), label, message.content);
            }
            println!();
        }
        HistoryCommand::Delete => {
            let session_id = match pointer.load()? {
                Some(id) => id,
                None => {
                    println!("{}", "No stored session.".yellow());
                    return Ok(());
                }
            };

            controller.store().set_session_id(&session_id);
            controller.delete_history().await?;
            println!("{}", format!("Deleted session {}", session_id).green());
        }
    }

    Ok(())
}
