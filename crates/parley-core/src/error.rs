//! Error types for parley-core

use thiserror::Error;

use crate::models::ConversationId;

/// Result type alias using parley-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error classes shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any request was made (per file, non-fatal).
    Validation,
    /// Network failure or non-2xx response.
    Fetch,
    /// 2xx transport whose body carried an `error` field.
    Backend,
    /// Anything else (local IO, malformed payloads, unknown ids).
    Other,
}

/// Errors that can occur in parley-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Attachment over the per-file size limit
    #[error("File {filename} exceeds maximum size of 10MB")]
    AttachmentTooLarge { filename: String, size_bytes: u64 },

    /// Transport-level HTTP failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response, with the body's error text when it had one
    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },

    /// Backend reported an error in the response body
    #[error("{0}")]
    Backend(String),

    /// Conversation is not present in the registry
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify this error for user-facing reporting.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AttachmentTooLarge { .. } => ErrorKind::Validation,
            Self::Transport(_) | Self::Status { .. } => ErrorKind::Fetch,
            Self::Backend(_) => ErrorKind::Backend,
            Self::ConversationNotFound(_)
            | Self::InvalidInput(_)
            | Self::Serialization(_)
            | Self::Io(_) => ErrorKind::Other,
        }
    }

    /// Error text supplied by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend(message) => Some(message),
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::ref_option)]
fn status_message(status: &u16, detail: &Option<String>) -> String {
    detail.as_deref().map_or_else(
        || format!("HTTP {status}"),
        |detail| format!("{detail} ({status})"),
    )
}
