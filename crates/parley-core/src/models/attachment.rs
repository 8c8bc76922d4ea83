//! Attachment model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

use super::conversation::ConversationId;

/// Per-file upload limit, enforced before anything is staged.
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// A unique identifier for a pending attachment, using UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(Uuid);

impl AttachmentId {
    /// Create a new unique attachment ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID.
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttachmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A file picked, dropped, or pasted by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct FileBlob {
    /// Original file name.
    pub name: String,
    /// Content MIME type.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FileBlob {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FileBlob")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl FileBlob {
    /// Build a blob, inferring the MIME type when none is declared.
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Attachment filename cannot be empty".to_string(),
            ));
        }
        let mime_type = infer_mime_type(mime_type, &name);
        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    /// Read a file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| {
                Error::InvalidInput(format!("Not a file path: {}", path.display()))
            })?;
        let bytes = std::fs::read(path)?;
        Self::new(name, None, bytes)
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// A file staged for the next outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Unique within the pending batch.
    pub id: AttachmentId,
    pub file: FileBlob,
}

/// Everything one send needs, captured when the send starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub text: String,
    pub attachments: Vec<Attachment>,
    /// `None` asks the backend to create a conversation for this message.
    pub conversation_id: Option<ConversationId>,
}

impl PendingSend {
    /// The text shown as the optimistic echo: the message plus a list of
    /// attached file names.
    #[must_use]
    pub fn echo_text(&self) -> String {
        if self.attachments.is_empty() {
            return self.text.clone();
        }
        let names = self
            .attachments
            .iter()
            .map(|attachment| format!("- {}", attachment.file.name))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\nAttachments:\n{names}", self.text)
    }
}

/// Resolve a MIME type from the declared type and the file extension.
///
/// A media extension wins over a generic text or octet-stream declaration.
#[must_use]
pub fn infer_mime_type(content_type: Option<&str>, file_name: &str) -> String {
    let extension_guess = mime_guess::from_path(file_name)
        .first_raw()
        .map(str::to_string);

    if let Some(content_type) = content_type {
        let trimmed = content_type.trim();
        if !trimmed.is_empty() {
            let normalized = trimmed.to_ascii_lowercase();

            if normalized != "application/octet-stream"
                && !(normalized.starts_with("text/")
                    && extension_guess.as_deref().is_some_and(is_media_mime_type))
            {
                return trimmed.to_string();
            }
        }
    }

    extension_guess.unwrap_or_else(|| "application/octet-stream".to_string())
}

fn is_media_mime_type(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
        || mime_type.starts_with("audio/")
        || mime_type.starts_with("video/")
}
