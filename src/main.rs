//! Newschat - chat client CLI
//!
#![doc = "Newschat - chat client for a retrieval-augmented news chatbot service"]
#![doc = "Main entry point for the Newschat application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newschat::cli::{Cli, Commands};
use newschat::commands;
use newschat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // If the user supplied a state DB path on the CLI, mirror it into
    // NEWSCHAT_STATE_DB so the pointer initializer can pick it up. This
    // keeps callers unchanged while allowing `SessionPointer::new()` to
    // honor an override.
    if let Some(db_path) = &cli.state_db {
        std::env::set_var("NEWSCHAT_STATE_DB", db_path);
        tracing::info!("Using state DB override from CLI: {}", db_path);
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { new } => {
            tracing::info!("Starting interactive chat");
            commands::chat::run_chat(config, new).await?;
            Ok(())
        }
        Commands::Ingest { text } => {
            tracing::info!("Starting content ingestion");
            commands::ingest::run_ingest(config, &text).await?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(config, command).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "newschat=debug"
    } else {
        "newschat=info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
