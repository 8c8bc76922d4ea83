//! Parley CLI - terminal client for a conversational chat backend
//!
//! Interactive chat by default, plus one-shot commands for scripting.

mod cli;
mod commands;
mod config_profiles;
mod error;
mod presenter;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::chat::run_chat;
use crate::commands::common::ConnectionArgs;
use crate::commands::completions::run_completions;
use crate::commands::config::{run_config_init, run_config_show};
use crate::commands::delete::run_delete;
use crate::commands::list::run_list;
use crate::commands::new::run_new;
use crate::commands::rename::run_rename;
use crate::commands::send::run_send;
use crate::commands::show::run_show;
use crate::error::CliError;

const DEFAULT_LOG_DIRECTIVE: &str = "parley=warn";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        if !error.already_reported() {
            eprintln!("Error: {error}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let connection = ConnectionArgs {
        base_url: cli.base_url,
        profile: cli.profile,
    };

    match cli.command {
        None => run_chat(&connection, None).await?,
        Some(Commands::Chat { conversation }) => {
            run_chat(&connection, conversation.as_deref()).await?;
        }
        Some(Commands::List { json }) => run_list(&connection, json).await?,
        Some(Commands::Show { id, json }) => run_show(&connection, &id, json).await?,
        Some(Commands::Send {
            conversation,
            attach,
            message,
        }) => {
            run_send(&connection, conversation.as_deref(), &attach, &message).await?;
        }
        Some(Commands::New) => run_new(&connection).await?,
        Some(Commands::Rename { id, title }) => run_rename(&connection, &id, &title).await?,
        Some(Commands::Delete { id, yes }) => run_delete(&connection, &id, yes).await?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init {
                profile,
                base_url,
                no_activate,
            } => run_config_init(
                profile.as_deref().or(connection.profile.as_deref()),
                base_url.or(connection.base_url),
                no_activate,
            )?,
            ConfigCommands::Show => run_config_show(&connection)?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests;
