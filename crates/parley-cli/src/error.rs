use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] parley_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No message text or attachments provided")]
    EmptyMessage,
    #[error("Invalid conversation ID: {0}")]
    InvalidConversationId(String),
    #[error("Could not read attachment {path}: {reason}")]
    Attachment { path: String, reason: String },
    #[error("A reply is still pending")]
    Busy,
    #[error("Configuration error: {0}")]
    Config(String),
    /// The failure was already printed by the terminal presenter.
    #[error("Operation failed")]
    Reported,
}

impl CliError {
    pub const fn already_reported(&self) -> bool {
        matches!(self, Self::Reported)
    }
}
