//! Pending attachments for the next outgoing message.

mod preview;

pub use preview::{
    build_preview, generate_thumbnail, AttachmentKind, AttachmentPreview, ThumbnailImage,
    ThumbnailOptions,
};

use crate::models::{Attachment, AttachmentId, FileBlob, MAX_ATTACHMENT_BYTES};
use crate::Error;

/// Result of staging a batch of files.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Accepted attachments, in the order they were added.
    pub accepted: Vec<Attachment>,
    /// One validation error per rejected file.
    pub rejected: Vec<Error>,
}

/// Ordered list of attachments waiting for the next send.
#[derive(Debug, Default)]
pub struct AttachmentStore {
    pending: Vec<Attachment>,
}

impl AttachmentStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Stage files. Oversized files are rejected one by one without stopping
    /// the rest of the batch.
    pub fn add(&mut self, files: impl IntoIterator<Item = FileBlob>) -> AddReport {
        let mut report = AddReport::default();
        for file in files {
            if file.size() > MAX_ATTACHMENT_BYTES {
                tracing::debug!(
                    "Rejecting attachment {} ({} bytes over limit)",
                    file.name,
                    file.size() - MAX_ATTACHMENT_BYTES
                );
                report.rejected.push(Error::AttachmentTooLarge {
                    size_bytes: file.size(),
                    filename: file.name,
                });
                continue;
            }

            let attachment = Attachment {
                id: AttachmentId::new(),
                file,
            };
            self.pending.push(attachment.clone());
            report.accepted.push(attachment);
        }
        report
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: AttachmentId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|attachment| attachment.id != id);
        self.pending.len() != before
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Empty the store, handing back what it held.
    pub fn take(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.pending)
    }

    /// Pending attachments in insertion order.
    pub fn list(&self) -> &[Attachment] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
