//! Seam between session logic and whatever draws the chat.

use crate::attachments::AttachmentPreview;
use crate::models::{AttachmentId, Role};

/// Title shown when no conversation is active.
pub const DEFAULT_TITLE: &str = "Parley";

/// UI collaborator driven by [`ChatSession`](crate::ChatSession).
///
/// Methods are called from async tasks and must not block for long. Only
/// [`confirm`](Presenter::confirm) waits on the user.
pub trait Presenter: Send + Sync {
    /// Append a message to the transcript.
    fn show_message(&self, role: Role, content: &str);

    /// Append an inline error entry to the transcript.
    fn show_error(&self, message: &str);

    /// Empty the transcript.
    fn clear_transcript(&self);

    /// Show the conversation title, or the default title for `None`.
    fn set_title(&self, title: Option<&str>);

    /// Ask a yes/no question.
    fn confirm(&self, prompt: &str) -> bool;

    /// Reset the input field after its text was taken for sending.
    fn clear_input(&self) {}

    /// Show or hide the "waiting for reply" indicator.
    fn set_waiting(&self, _waiting: bool) {}

    /// Show the preview for a staged attachment. May arrive after the
    /// attachment was already sent or removed.
    fn show_attachment_preview(&self, _id: AttachmentId, _name: &str, _preview: &AttachmentPreview) {
    }

    /// Drop one attachment preview.
    fn remove_attachment_preview(&self, _id: AttachmentId) {}

    /// Drop all attachment previews.
    fn clear_attachment_previews(&self) {}
}
