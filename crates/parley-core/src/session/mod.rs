//! Conversation session: owns the client-side state and runs the user-facing
//! operations against a [`ChatBackend`], reporting through a [`Presenter`].
//!
//! Operations take `&self` and may interleave at await points, as UI events
//! do. The busy flag is the only exclusion: it keeps sends from overlapping.
//! Registry and attachment changes from concurrent operations are not
//! serialized beyond each short critical section.

mod lifecycle;
mod loader;
mod send;

pub use lifecycle::{DeleteOutcome, RenameOutcome};
pub use send::{SendOutcome, SkipReason};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::attachments::{build_preview, AddReport, AttachmentStore};
use crate::backend::ChatBackend;
use crate::models::{Attachment, AttachmentId, Conversation, ConversationId, FileBlob};
use crate::presenter::Presenter;
use crate::registry::ConversationRegistry;
use crate::Error;

/// Title given to a conversation the backend listing does not include yet.
const NEW_CONVERSATION_TITLE: &str = "New conversation";

/// Mutable client-side state shared by all session operations.
#[derive(Debug, Default)]
pub struct SessionState {
    pub registry: ConversationRegistry,
    pub attachments: AttachmentStore,
}

/// A chat session bound to one backend and one presenter.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    presenter: Arc<dyn Presenter>,
    state: Mutex<SessionState>,
    busy: AtomicBool,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            backend,
            presenter,
            state: Mutex::new(SessionState::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a send is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run `f` against a consistent snapshot of the state.
    pub async fn with_state<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    pub async fn active_conversation(&self) -> Option<ConversationId> {
        self.with_state(|state| state.registry.get_active()).await
    }

    pub async fn conversations(&self) -> Vec<Conversation> {
        self.with_state(|state| state.registry.conversations().to_vec())
            .await
    }

    pub async fn pending_attachments(&self) -> Vec<Attachment> {
        self.with_state(|state| state.attachments.list().to_vec())
            .await
    }

    /// Stage files for the next send. Each oversized file is reported through
    /// the presenter; the rest are accepted and get a preview.
    pub async fn attach(&self, files: impl IntoIterator<Item = FileBlob>) -> AddReport {
        let report = self.state.lock().await.attachments.add(files);

        for error in &report.rejected {
            tracing::warn!("Attachment rejected: {error}");
            self.presenter.show_error(&error.to_string());
        }
        for attachment in &report.accepted {
            self.dispatch_preview(attachment);
        }
        report
    }

    /// Unstage one attachment. Unknown ids are ignored.
    pub async fn detach(&self, id: AttachmentId) -> bool {
        let removed = self.state.lock().await.attachments.remove(id);
        if removed {
            self.presenter.remove_attachment_preview(id);
        }
        removed
    }

    /// Empty the transcript and drop staged attachments.
    pub async fn clear_view(&self) {
        self.state.lock().await.attachments.clear();
        self.presenter.clear_transcript();
        self.presenter.clear_attachment_previews();
    }

    /// Make `id` the active conversation and return its title.
    ///
    /// An id the registry does not know triggers a listing refresh first; if
    /// the listing still lacks it (or cannot be fetched) the id is added under
    /// a placeholder title. The id is active when this returns.
    async fn activate(&self, id: ConversationId) -> String {
        let known = self.with_state(|state| state.registry.contains(id)).await;
        let listing = if known {
            None
        } else {
            tracing::debug!("Conversation {id} is not listed, refreshing");
            Some(self.backend.list_conversations().await)
        };

        let mut state = self.state.lock().await;
        match listing {
            Some(Ok(conversations)) => state.registry.replace_all(conversations),
            Some(Err(error)) => {
                tracing::warn!("Could not refresh conversations: {error}");
            }
            None => {}
        }
        if state.registry.contains(id) {
            state.registry.set_active(id);
        } else {
            state.registry.add(id, NEW_CONVERSATION_TITLE);
        }
        state
            .registry
            .title(id)
            .map_or_else(|| NEW_CONVERSATION_TITLE.to_string(), str::to_string)
    }

    // Image decoding runs detached and only ever talks to the presenter, so a
    // late preview for an attachment that was already sent is harmless.
    fn dispatch_preview(&self, attachment: &Attachment) {
        let id = attachment.id;
        if !attachment.file.is_image() {
            let preview = build_preview(&attachment.file);
            self.presenter
                .show_attachment_preview(id, &attachment.file.name, &preview);
            return;
        }

        let presenter = Arc::clone(&self.presenter);
        let file = attachment.file.clone();
        let render = move || {
            let preview = build_preview(&file);
            presenter.show_attachment_preview(id, &file.name, &preview);
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(render);
            }
            Err(_) => render(),
        }
    }
}

/// Text shown to the user for a failed operation.
fn describe(error: &Error) -> String {
    error
        .backend_message()
        .map_or_else(|| error.to_string(), str::to_string)
}

/// Holds the busy flag for the lifetime of one send. Released on drop, so
/// every exit path (including a panic) frees it.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
