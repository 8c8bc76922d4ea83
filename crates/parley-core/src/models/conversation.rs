//! Conversation model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Server-assigned conversation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(i64);

impl ConversationId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ConversationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A conversation as listed in the sidebar.
///
/// Whether it is active is tracked by the registry, not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
}

impl Conversation {
    #[must_use]
    pub fn new(id: impl Into<ConversationId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_id_parses_trimmed_integers() {
        assert_eq!(" 42 ".parse::<ConversationId>().unwrap(), ConversationId::new(42));
        assert!("abc".parse::<ConversationId>().is_err());
    }

    #[test]
    fn conversation_deserializes_extra_listing_fields() {
        let conversation: Conversation = serde_json::from_str(
            r#"{"id": 7, "title": "Chat 2024-05-01 10:00", "created_at": "2024-05-01 10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(conversation, Conversation::new(7, "Chat 2024-05-01 10:00"));
    }
}
