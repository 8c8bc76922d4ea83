//! Single-flight message submission.

use crate::models::{ConversationId, PendingSend, Role};
use crate::Error;

use super::{describe, BusyGuard, ChatSession};

/// Why a send did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another send is in flight.
    Busy,
    /// No text and no attachments.
    Empty,
}

/// What became of one `send` call. Failures have already been shown to the
/// user when this is returned.
#[derive(Debug)]
pub enum SendOutcome {
    Skipped(SkipReason),
    Delivered {
        conversation_id: ConversationId,
        reply: String,
    },
    Failed(Error),
}

impl SendOutcome {
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

impl ChatSession {
    /// Send `text` plus every staged attachment to the active conversation,
    /// or to a new one when none is active.
    ///
    /// The user's message is echoed before the request is issued and is never
    /// withdrawn, even on failure. Staged attachments are consumed whether or
    /// not the request succeeds. A call made while another send is in flight
    /// returns [`SkipReason::Busy`] without doing anything.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("Send ignored: another send is in flight");
            return SendOutcome::Skipped(SkipReason::Busy);
        };

        let text = text.trim();
        let pending = {
            let mut state = self.state.lock().await;
            if text.is_empty() && state.attachments.is_empty() {
                return SendOutcome::Skipped(SkipReason::Empty);
            }
            PendingSend {
                text: text.to_string(),
                attachments: state.attachments.take(),
                conversation_id: state.registry.get_active(),
            }
        };

        self.presenter.clear_input();
        self.presenter.show_message(Role::User, &pending.echo_text());
        self.presenter.clear_attachment_previews();
        self.presenter.set_waiting(true);

        let result = self.backend.send_message(&pending).await;
        self.presenter.set_waiting(false);

        let reply = match result {
            Ok(reply) => reply,
            Err(error) => {
                tracing::warn!("Send failed: {error}");
                self.presenter.show_error(&describe(&error));
                return SendOutcome::Failed(error);
            }
        };

        if pending.conversation_id.is_none() {
            tracing::info!("Backend started conversation {}", reply.conversation_id);
            let title = self.activate(reply.conversation_id).await;
            self.presenter.set_title(Some(&title));
        }
        self.presenter.show_message(Role::Assistant, &reply.response);

        SendOutcome::Delivered {
            conversation_id: reply.conversation_id,
            reply: reply.response,
        }
    }
}
