//! The chat backend's REST surface.

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{Conversation, ConversationId, Message, PendingSend};
use crate::Result;

/// Successful reply to `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    /// The conversation the message landed in; new when none was sent.
    pub conversation_id: ConversationId,
    /// Assistant reply, markdown.
    pub response: String,
}

/// Operations the session needs from the backend.
///
/// Implementations report transport failures and non-2xx responses as
/// [`Error::Transport`](crate::Error::Transport) or
/// [`Error::Status`](crate::Error::Status), and 2xx bodies carrying an
/// `error` field as [`Error::Backend`](crate::Error::Backend).
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// `GET /conversations`, most recently updated first.
    async fn list_conversations(&self) -> Result<Vec<Conversation>>;

    /// `GET /conversation/{id}`, in whatever order the backend returns.
    async fn list_messages(&self, id: ConversationId) -> Result<Vec<Message>>;

    /// `POST /chat` as multipart form data.
    async fn send_message(&self, pending: &PendingSend) -> Result<ChatReply>;

    /// `POST /conversation` with an empty JSON object.
    async fn create_conversation(&self) -> Result<Conversation>;

    /// `PUT /conversation/{id}/title`.
    async fn rename_conversation(&self, id: ConversationId, title: &str) -> Result<()>;

    /// `DELETE /conversation/{id}`.
    async fn delete_conversation(&self, id: ConversationId) -> Result<()>;
}
