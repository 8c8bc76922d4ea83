//! In-memory list of known conversations and the active selection.

use crate::models::{Conversation, ConversationId};

/// A registry entry with its derived active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry<'a> {
    pub conversation: &'a Conversation,
    pub is_active: bool,
}

/// Known conversations, most recent first, with at most one active.
#[derive(Debug, Default)]
pub struct ConversationRegistry {
    conversations: Vec<Conversation>,
    active: Option<ConversationId>,
}

impl ConversationRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conversations: Vec::new(),
            active: None,
        }
    }

    /// Mark `id` active. An unknown id leaves no entry active.
    pub fn set_active(&mut self, id: ConversationId) {
        self.active = self.contains(id).then_some(id);
    }

    /// Insert at the front and activate. An id already present is moved to
    /// the front with the new title, so it never appears twice.
    pub fn add(&mut self, id: ConversationId, title: impl Into<String>) {
        self.conversations.retain(|conversation| conversation.id != id);
        self.conversations.insert(0, Conversation::new(id, title));
        self.set_active(id);
    }

    /// Remove an entry. Returns whether it was the active one.
    pub fn remove(&mut self, id: ConversationId) -> bool {
        self.conversations.retain(|conversation| conversation.id != id);
        if self.active == Some(id) {
            self.active = None;
            return true;
        }
        false
    }

    /// Update a title in place. Returns whether the entry exists.
    pub fn rename(&mut self, id: ConversationId, title: impl Into<String>) -> bool {
        match self.conversations.iter_mut().find(|c| c.id == id) {
            Some(conversation) => {
                conversation.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Replace the contents with a fresh listing. The active id survives only
    /// if it is still listed.
    pub fn replace_all(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
        if let Some(active) = self.active {
            self.set_active(active);
        }
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub const fn get_active(&self) -> Option<ConversationId> {
        self.active
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn is_active(&self, id: ConversationId) -> bool {
        self.active == Some(id)
    }

    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn title(&self, id: ConversationId) -> Option<&str> {
        self.get(id).map(|conversation| conversation.title.as_str())
    }

    pub fn contains(&self, id: ConversationId) -> bool {
        self.get(id).is_some()
    }

    pub fn first(&self) -> Option<&Conversation> {
        self.conversations.first()
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Entries in registry order with their active flag.
    pub fn entries(&self) -> impl Iterator<Item = RegistryEntry<'_>> {
        self.conversations.iter().map(|conversation| RegistryEntry {
            conversation,
            is_active: self.is_active(conversation.id),
        })
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
