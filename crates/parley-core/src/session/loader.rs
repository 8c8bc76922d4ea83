//! Conversation history loading.

use crate::models::{sort_messages, ConversationId, Message};
use crate::Result;

use super::ChatSession;

impl ChatSession {
    /// Fetch a conversation's history and display it, oldest first.
    ///
    /// The transcript is replaced in one step once the data has arrived and
    /// `id` becomes active, even when the registry did not list it. On failure
    /// the error is shown and the registry is left as it was.
    pub async fn load(&self, id: ConversationId) -> Result<Vec<Message>> {
        let mut messages = match self.backend.list_messages(id).await {
            Ok(messages) => messages,
            Err(error) => {
                tracing::warn!("Failed to load conversation {id}: {error}");
                self.presenter.show_error("Failed to load conversation");
                return Err(error);
            }
        };
        sort_messages(&mut messages);

        let title = self.activate(id).await;

        self.presenter.clear_transcript();
        for message in &messages {
            self.presenter.show_message(message.role, &message.content);
        }
        self.presenter.set_title(Some(&title));

        tracing::debug!("Loaded {} messages for conversation {id}", messages.len());
        Ok(messages)
    }
}
