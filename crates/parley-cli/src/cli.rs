use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Chat with a conversational backend from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (overrides PARLEY_BASE_URL and the profile)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// CLI profile name
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat (the default)
    Chat {
        /// Open this conversation instead of the most recent one
        #[arg(short, long, value_name = "ID")]
        conversation: Option<String>,
    },
    /// List conversations, most recently updated first
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a conversation's messages in order
    Show {
        /// Conversation ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send one message and print the reply
    Send {
        /// Conversation ID (a new conversation is started when omitted)
        #[arg(short, long, value_name = "ID")]
        conversation: Option<String>,
        /// File to attach (repeatable)
        #[arg(short, long, value_name = "PATH")]
        attach: Vec<PathBuf>,
        /// Message text
        message: Vec<String>,
    },
    /// Create an empty conversation
    New,
    /// Rename a conversation
    Rename {
        /// Conversation ID
        id: String,
        /// New title
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Delete a conversation
    #[command(alias = "rm")]
    Delete {
        /// Conversation ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Backend base URL to store in the profile
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved configuration
    Show,
}
