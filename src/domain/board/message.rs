//! Board message entities.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp, UserId};

use super::BoardError;

/// A message posted to the shared board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMessage {
    /// Database-assigned identifier.
    pub id: MessageId,
    /// Owner of the message. Only the owner may delete it.
    pub user_id: UserId,
    /// Display name shown alongside the message.
    pub author: String,
    /// Message body.
    pub text: String,
    /// When the message was created.
    pub created_at: Timestamp,
}

/// A message awaiting insertion, validated but not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub user_id: UserId,
    pub author: String,
    pub text: String,
}

impl NewMessage {
    /// Validates and constructs a new message.
    ///
    /// The body must contain at least one non-whitespace character. The
    /// author falls back to the user's email-like id when blank.
    pub fn new(
        user_id: UserId,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, BoardError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(BoardError::EmptyText);
        }

        let author = author.into();
        let author = if author.trim().is_empty() {
            user_id.as_str().to_string()
        } else {
            author.trim().to_string()
        };

        Ok(Self {
            user_id,
            author,
            text: text.trim().to_string(),
        })
    }
}
