//! Interactive chat command
//!
//! A readline-based loop over the conversation controller. The loop only
//! renders session snapshots and invokes controller operations; all state
//! transitions live in the session module.

use crate::api::HttpChatService;
use crate::config::Config;
use crate::error::Result;
use crate::session::{
    ChatSession, ConversationController, Message, MessageStatus, Sender, SessionStore,
};
use crate::storage::SessionPointer;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// Slash commands recognized by the chat loop
enum SlashCommand {
    New,
    Delete,
    Retry,
    Help,
    Exit,
    None,
}

fn parse_slash_command(input: &str) -> SlashCommand {
    match input {
        "/new" => SlashCommand::New,
        "/delete" => SlashCommand::Delete,
        "/retry" => SlashCommand::Retry,
        "/help" => SlashCommand::Help,
        "/quit" | "/exit" => SlashCommand::Exit,
        _ => SlashCommand::None,
    }
}

/// Run the interactive chat loop
///
/// Restores the stored session when one exists (unless `fresh` forces a
/// new one); otherwise creates a session before entering the loop.
pub async fn run_chat(config: Config, fresh: bool) -> Result<()> {
    let service = Arc::new(HttpChatService::new(&config.api)?);
    let pointer = SessionPointer::new()?;
    let controller = ConversationController::new(service, SessionStore::new(), pointer);

    if fresh {
        let session_id = controller.create_session().await?;
        println!("{}", format!("Started new session {}", session_id).green());
    } else {
        match controller.restore_session().await {
            Ok(true) => {
                let session = controller.session();
                println!(
                    "{}",
                    format!(
                        "Restored session {} ({} messages)",
                        session.session_id,
                        session.messages.len()
                    )
                    .green()
                );
                for message in &session.messages {
                    print_message(message);
                }
            }
            Ok(false) => {
                let session_id = controller.create_session().await?;
                println!("{}", format!("Started new session {}", session_id).green());
            }
            Err(err) => {
                print_error_banner(&format!("Could not restore previous session: {}", err));
                println!(
                    "{}",
                    "The stored session is kept; retry later or run `newschat chat --new`.".yellow()
                );
                return Err(err);
            }
        }
    }

    print_help();

    let mut rl = DefaultEditor::new()?;
    let mut rendered = controller.session().messages.len();

    loop {
        match rl.readline(&"you> ".cyan().to_string()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                match parse_slash_command(trimmed) {
                    SlashCommand::New => {
                        match controller.create_session().await {
                            Ok(session_id) => {
                                println!(
                                    "{}",
                                    format!("Started new session {}", session_id).green()
                                );
                                rendered = 0;
                            }
                            Err(err) => print_error_banner(&err.to_string()),
                        }
                        continue;
                    }
                    SlashCommand::Delete => {
                        match controller.delete_history().await {
                            Ok(()) => {
                                println!(
                                    "{}",
                                    "History deleted. Use /new to start over or /quit to leave."
                                        .green()
                                );
                                rendered = 0;
                            }
                            Err(err) => print_error_banner(&err.to_string()),
                        }
                        continue;
                    }
                    SlashCommand::Retry => {
                        match last_failed_user_message(&controller.session()) {
                            Some(message_id) => {
                                controller.retry_message(&message_id).await?;
                                rendered = render_new_bot_messages(&controller, rendered);
                                report_session_error(&controller);
                            }
                            None => println!("{}", "Nothing to retry.".yellow()),
                        }
                        continue;
                    }
                    SlashCommand::Help => {
                        print_help();
                        continue;
                    }
                    SlashCommand::Exit => break,
                    SlashCommand::None => {}
                }

                if trimmed.chars().count() > config.chat.max_message_chars {
                    println!(
                        "{}",
                        format!(
                            "Message too long ({} chars max).",
                            config.chat.max_message_chars
                        )
                        .red()
                    );
                    continue;
                }

                controller.send_message(trimmed).await?;
                rendered = render_new_bot_messages(&controller, rendered);
                report_session_error(&controller);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    println!("{}", "Bye.".dimmed());
    Ok(())
}

/// Print bot messages appended since the last render; returns the new
/// high-water mark. User messages are skipped because the user just typed
/// them at the prompt.
fn render_new_bot_messages(controller: &ConversationController, from: usize) -> usize {
    let session = controller.session();
    for message in session.messages.iter().skip(from) {
        if message.sender == Sender::Bot {
            print_message(message);
        }
    }
    session.messages.len()
}

fn print_message(message: &Message) {
    match (message.sender, message.status) {
        (Sender::User, _) => println!("{} {}", "you>".cyan().bold(), message.content),
        (Sender::Bot, MessageStatus::Error) => {
            println!("{} {}", "bot>".red().bold(), message.content.red());
        }
        (Sender::Bot, _) => println!("{} {}", "bot>".green().bold(), message.content),
    }
}

fn print_error_banner(message: &str) {
    println!("{}", format!("error: {}", message).red());
}

fn report_session_error(controller: &ConversationController) {
    if let Some(error) = controller.session().error {
        print_error_banner(&error);
        println!("{}", "Use /retry to resend your last message.".yellow());
    }
}

fn print_help() {
    println!(
        "{}",
        "Commands: /retry resend last failed message, /delete wipe history, /new fresh session, /help, /quit"
            .dimmed()
    );
}

/// Find the user message paired with the most recent failed round trip
fn last_failed_user_message(session: &ChatSession) -> Option<String> {
    let failed_at = session
        .messages
        .iter()
        .rposition(|m| m.sender == Sender::Bot && m.status == MessageStatus::Error)?;

    session.messages[..failed_at]
        .iter()
        .rev()
        .find(|m| m.sender == Sender::User)
        .map(|m| m.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_commands() {
        assert!(matches!(parse_slash_command("/new"), SlashCommand::New));
        assert!(matches!(parse_slash_command("/delete"), SlashCommand::Delete));
        assert!(matches!(parse_slash_command("/retry"), SlashCommand::Retry));
        assert!(matches!(parse_slash_command("/quit"), SlashCommand::Exit));
        assert!(matches!(parse_slash_command("/exit"), SlashCommand::Exit));
        assert!(matches!(parse_slash_command("hello"), SlashCommand::None));
    }

    #[test]
    fn test_last_failed_user_message_finds_pair() {
        let user_ok = Message::user("fine");
        let bot_ok = Message::bot("answer");
        let user_failed = Message::user("doomed");
        let failed_id = user_failed.id.clone();
        let bot_err = Message::bot_error("Sorry, I encountered an error. Please try again.");

        let session = ChatSession {
            session_id: "abc123".to_string(),
            messages: vec![user_ok, bot_ok, user_failed, bot_err],
            error: Some("Request timeout. Please try again.".to_string()),
        };

        assert_eq!(last_failed_user_message(&session), Some(failed_id));
    }

    #[test]
    fn test_last_failed_user_message_none_without_failures() {
        let session = ChatSession {
            session_id: "abc123".to_string(),
            messages: vec![Message::user("fine"), Message::bot("answer")],
            error: None,
        };
        assert!(last_failed_user_message(&session).is_none());
    }
}
