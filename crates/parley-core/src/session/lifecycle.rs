//! Create, rename, delete, and list conversations.

use crate::models::{Conversation, ConversationId};
use crate::{Error, Result};

use super::{describe, ChatSession};

const DELETE_PROMPT: &str = "Are you sure you want to delete this conversation?";

/// Result of a rename request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Title was empty or unchanged; nothing was sent.
    Unchanged,
    Renamed,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation.
    Cancelled,
    Deleted,
}

impl ChatSession {
    /// Replace the registry with the backend's conversation list.
    pub async fn refresh(&self) -> Result<Vec<Conversation>> {
        match self.backend.list_conversations().await {
            Ok(conversations) => {
                self.state
                    .lock()
                    .await
                    .registry
                    .replace_all(conversations.clone());
                Ok(conversations)
            }
            Err(error) => {
                tracing::warn!("Failed to list conversations: {error}");
                self.presenter.show_error("Failed to load conversations");
                Err(error)
            }
        }
    }

    /// Populate the registry and open the most recent conversation, if any.
    pub async fn start(&self) -> Result<Option<ConversationId>> {
        self.refresh().await?;
        let first = self
            .with_state(|state| state.registry.first().map(|c| c.id))
            .await;
        match first {
            Some(id) => self.load(id).await.map(|_| Some(id)),
            None => Ok(None),
        }
    }

    /// Create an empty conversation and make it active.
    pub async fn create(&self) -> Result<Conversation> {
        let conversation = match self.backend.create_conversation().await {
            Ok(conversation) => conversation,
            Err(error) => {
                tracing::warn!("Failed to create conversation: {error}");
                self.presenter.show_error(&format!(
                    "Failed to create new conversation: {}",
                    describe(&error)
                ));
                return Err(error);
            }
        };

        self.state
            .lock()
            .await
            .registry
            .add(conversation.id, conversation.title.clone());
        self.presenter.clear_transcript();
        self.presenter.set_title(Some(&conversation.title));

        tracing::info!("Created conversation {}", conversation.id);
        Ok(conversation)
    }

    /// Rename a conversation. Blank or identical titles are not sent. The
    /// local title changes only after the backend accepts it.
    pub async fn rename(&self, id: ConversationId, new_title: &str) -> Result<RenameOutcome> {
        let new_title = new_title.trim();
        let current = self
            .with_state(|state| state.registry.title(id).map(str::to_string))
            .await;
        let Some(current) = current else {
            let error = Error::ConversationNotFound(id);
            self.presenter.show_error(&error.to_string());
            return Err(error);
        };
        if new_title.is_empty() || new_title == current {
            return Ok(RenameOutcome::Unchanged);
        }

        if let Err(error) = self.backend.rename_conversation(id, new_title).await {
            tracing::warn!("Failed to rename conversation {id}: {error}");
            self.presenter
                .show_error("Failed to update conversation title");
            return Err(error);
        }

        let is_active = {
            let mut state = self.state.lock().await;
            state.registry.rename(id, new_title);
            state.registry.is_active(id)
        };
        if is_active {
            self.presenter.set_title(Some(new_title));
        }

        tracing::info!("Renamed conversation {id}");
        Ok(RenameOutcome::Renamed)
    }

    /// Delete a conversation after the user confirms.
    ///
    /// Deleting the active conversation clears the view and opens the next
    /// conversation in registry order, if there is one.
    pub async fn delete(&self, id: ConversationId) -> Result<DeleteOutcome> {
        if !self.presenter.confirm(DELETE_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(error) = self.backend.delete_conversation(id).await {
            tracing::warn!("Failed to delete conversation {id}: {error}");
            let message = error
                .backend_message()
                .unwrap_or("Failed to delete conversation")
                .to_string();
            self.presenter.show_error(&message);
            return Err(error);
        }

        let (was_active, next) = {
            let mut state = self.state.lock().await;
            let was_active = state.registry.remove(id);
            (was_active, state.registry.first().map(|c| c.id))
        };
        tracing::info!("Deleted conversation {id}");

        if was_active {
            self.presenter.clear_transcript();
            self.presenter.set_title(None);
            if let Some(next) = next {
                // A failed load has already been shown; the delete stands.
                if let Err(error) = self.load(next).await {
                    tracing::debug!("Could not open conversation {next} after delete: {error}");
                }
            }
        }

        Ok(DeleteOutcome::Deleted)
    }
}
