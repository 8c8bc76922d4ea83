//! Data models for Parley

mod attachment;
mod conversation;
mod message;

pub use attachment::{
    infer_mime_type, Attachment, AttachmentId, FileBlob, PendingSend, MAX_ATTACHMENT_BYTES,
};
pub use conversation::{Conversation, ConversationId};
pub use message::{sort_messages, Message, MessageId, Role};
