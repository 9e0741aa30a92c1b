//! Command-line interface definition for Newschat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, content ingestion, and
//! history management.

use clap::{Parser, Subcommand};

/// Newschat - chat client for a retrieval-augmented news chatbot service
///
/// Talks to a remote chatbot service, keeping one conversation session
/// alive across restarts.
#[derive(Parser, Debug, Clone)]
#[command(name = "newschat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the service base URL from config
    #[arg(long)]
    pub api_base: Option<String>,

    /// Override the session state database path
    #[arg(long)]
    pub state_db: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Newschat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Start a fresh session even if a stored one exists
        #[arg(long)]
        new: bool,
    },

    /// Submit content for ingestion into the retrieval index
    Ingest {
        /// Text to ingest
        #[arg(short, long)]
        text: String,
    },

    /// Manage the stored conversation history
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// Print the stored session's history
    Show,

    /// Delete the stored session's history and forget the session
    Delete,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_command() {
        let cli = Cli::try_parse_from(["newschat", "chat"]).expect("parse failed");
        assert!(matches!(cli.command, Commands::Chat { new: false }));
    }

    #[test]
    fn test_parse_chat_new_flag() {
        let cli = Cli::try_parse_from(["newschat", "chat", "--new"]).expect("parse failed");
        assert!(matches!(cli.command, Commands::Chat { new: true }));
    }

    #[test]
    fn test_parse_ingest_command() {
        let cli = Cli::try_parse_from(["newschat", "ingest", "--text", "breaking news"])
            .expect("parse failed");
        match cli.command {
            Commands::Ingest { text } => assert_eq!(text, "breaking news"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_history_subcommands() {
        let cli = Cli::try_parse_from(["newschat", "history", "show"]).expect("parse failed");
        assert!(matches!(
            cli.command,
            Commands::History {
                command: HistoryCommand::Show
            }
        ));

        let cli = Cli::try_parse_from(["newschat", "history", "delete"]).expect("parse failed");
        assert!(matches!(
            cli.command,
            Commands::History {
                command: HistoryCommand::Delete
            }
        ));
    }

    #[test]
    fn test_parse_api_base_override() {
        let cli = Cli::try_parse_from(["newschat", "--api-base", "http://localhost:9999", "chat"])
            .expect("parse failed");
        assert_eq!(cli.api_base.as_deref(), Some("http://localhost:9999"));
    }
}
