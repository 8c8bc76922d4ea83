//! parley-core - Core library for Parley
//!
//! This crate holds the client-side conversation state (registry, pending
//! attachments, single-flight send guard), the backend HTTP client, and the
//! session operations that tie them together. Rendering is delegated to a
//! [`Presenter`] implementation supplied by the front end.

pub mod attachments;
pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod presenter;
pub mod registry;
pub mod session;
pub mod util;

#[cfg(test)]
mod testing;

pub use error::{Error, ErrorKind, Result};
pub use models::{Attachment, AttachmentId, Conversation, ConversationId, FileBlob, Message, Role};
pub use presenter::Presenter;
pub use session::{ChatSession, SendOutcome};
