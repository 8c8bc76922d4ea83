//! Interactive chat loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use parley_core::session::SkipReason;
use parley_core::{ChatSession, SendOutcome};

use crate::commands::common::{
    format_conversation_lines, format_size, open_session, parse_conversation_id, read_attachment,
    ConnectionArgs,
};
use crate::error::CliError;
use crate::presenter::TerminalPresenter;

const PROMPT: &str = "> ";

const HELP: &str = "\
Type a message and press enter to send it. Commands:
  /new                 start a new conversation
  /list                list conversations (* marks the open one)
  /open ID             open a conversation
  /rename ID TITLE     rename a conversation
  /delete ID           delete a conversation
  /attach PATH...      stage files for the next message
  /detach N            unstage the Nth staged file
  /files               list staged files
  /clear               clear the screen and staged files
  /help                show this help
  /quit                exit";

/// One line of chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Send(String),
    New,
    List,
    Open(String),
    Rename { id: String, title: String },
    Delete(String),
    Attach(Vec<PathBuf>),
    Detach(String),
    Files,
    Clear,
    Help,
    Quit,
    /// A command with missing arguments; carries the usage line.
    Usage(&'static str),
    Unknown(String),
}

pub fn parse_chat_command(line: &str) -> ChatCommand {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return ChatCommand::Send(line.to_string());
    };

    let (name, args) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(name, args)| (name, args.trim()));

    match name {
        "new" => ChatCommand::New,
        "list" | "ls" => ChatCommand::List,
        "open" if !args.is_empty() => ChatCommand::Open(args.to_string()),
        "open" => ChatCommand::Usage("/open ID"),
        "rename" => match args.split_once(char::is_whitespace) {
            Some((id, title)) if !title.trim().is_empty() => ChatCommand::Rename {
                id: id.to_string(),
                title: title.trim().to_string(),
            },
            _ => ChatCommand::Usage("/rename ID TITLE"),
        },
        "delete" | "rm" if !args.is_empty() => ChatCommand::Delete(args.to_string()),
        "delete" | "rm" => ChatCommand::Usage("/delete ID"),
        "attach" if !args.is_empty() => {
            ChatCommand::Attach(args.split_whitespace().map(PathBuf::from).collect())
        }
        "attach" => ChatCommand::Usage("/attach PATH..."),
        "detach" if !args.is_empty() => ChatCommand::Detach(args.to_string()),
        "detach" => ChatCommand::Usage("/detach N"),
        "files" => ChatCommand::Files,
        "clear" => ChatCommand::Clear,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        other => ChatCommand::Unknown(other.to_string()),
    }
}

pub async fn run_chat(
    connection: &ConnectionArgs,
    conversation: Option<&str>,
) -> Result<(), CliError> {
    let conversation = conversation.map(parse_conversation_id).transpose()?;
    let session = open_session(connection, TerminalPresenter::new())?;

    // Startup failures were shown; the prompt stays usable so the user can retry.
    match conversation {
        Some(id) => {
            if session.refresh().await.is_ok() {
                let _ = session.load(id).await;
            }
        }
        None => {
            if let Ok(None) = session.start().await {
                println!("No conversations yet. Type a message to start one, or /help.\n");
            }
        }
    }

    // A blank line sends staged files on their own.
    while let Some(line) = read_line(PROMPT).await? {
        if !handle_command(&session, parse_chat_command(&line)).await? {
            break;
        }
    }

    Ok(())
}

/// Run one command. Returns `false` when the loop should end.
async fn handle_command(session: &ChatSession, command: ChatCommand) -> Result<bool, CliError> {
    match command {
        ChatCommand::Send(text) => match session.send(&text).await {
            SendOutcome::Skipped(SkipReason::Busy) => {
                eprintln!("{}", CliError::Busy);
            }
            SendOutcome::Skipped(SkipReason::Empty)
            | SendOutcome::Delivered { .. }
            | SendOutcome::Failed(_) => {}
        },
        ChatCommand::New => {
            let _ = session.create().await;
        }
        ChatCommand::List => {
            if session.refresh().await.is_ok() {
                let conversations = session.conversations().await;
                let active = session.active_conversation().await;
                for line in format_conversation_lines(&conversations, active) {
                    println!("{line}");
                }
                println!();
            }
        }
        ChatCommand::Open(id) => match parse_conversation_id(&id) {
            Ok(id) => {
                let _ = session.load(id).await;
            }
            Err(error) => eprintln!("Error: {error}"),
        },
        ChatCommand::Rename { id, title } => match parse_conversation_id(&id) {
            Ok(id) => {
                let _ = session.rename(id, &title).await;
            }
            Err(error) => eprintln!("Error: {error}"),
        },
        ChatCommand::Delete(id) => match parse_conversation_id(&id) {
            Ok(id) => {
                let _ = session.delete(id).await;
            }
            Err(error) => eprintln!("Error: {error}"),
        },
        ChatCommand::Attach(paths) => {
            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                match read_attachment(path) {
                    Ok(file) => files.push(file),
                    Err(error) => eprintln!("Error: {error}"),
                }
            }
            session.attach(files).await;
        }
        ChatCommand::Detach(position) => {
            detach_by_position(session, &position).await;
        }
        ChatCommand::Files => {
            let pending = session.pending_attachments().await;
            if pending.is_empty() {
                println!("No files staged");
            }
            for (index, attachment) in pending.iter().enumerate() {
                println!(
                    "{:>3}. {} ({}, {})",
                    index + 1,
                    attachment.file.name,
                    attachment.file.mime_type,
                    format_size(attachment.file.size())
                );
            }
        }
        ChatCommand::Clear => session.clear_view().await,
        ChatCommand::Help => println!("{HELP}\n"),
        ChatCommand::Quit => return Ok(false),
        ChatCommand::Usage(usage) => eprintln!("Usage: {usage}"),
        ChatCommand::Unknown(name) => {
            eprintln!("Unknown command /{name}. Type /help for a list of commands.");
        }
    }
    Ok(true)
}

async fn detach_by_position(session: &ChatSession, position: &str) {
    let pending = session.pending_attachments().await;
    let attachment = position
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| pending.get(index));

    match attachment {
        Some(attachment) => {
            if session.detach(attachment.id).await {
                println!("Removed {}", attachment.file.name);
            }
        }
        None => eprintln!("Error: No staged file number {}", position.trim()),
    }
}

/// Read one line from stdin without holding it between prompts, so
/// confirmations can read stdin too. `None` at end of input.
async fn read_line(prompt: &'static str) -> Result<Option<String>, CliError> {
    let line = tokio::task::spawn_blocking(move || -> io::Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    })
    .await
    .map_err(io::Error::other)??;
    Ok(line)
}
