//! Message Repository Port - persistence for board messages.

use async_trait::async_trait;

use crate::domain::board::{BoardError, BoardMessage, NewMessage};
use crate::domain::foundation::{MessageId, UserId};

/// Port for board message persistence.
///
/// The Postgres adapter is the production implementation; tests use an
/// in-memory double.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a new message, returning it with its database-assigned id.
    async fn insert(&self, message: NewMessage) -> Result<BoardMessage, BoardError>;

    /// List all messages, newest first.
    async fn list_all(&self) -> Result<Vec<BoardMessage>, BoardError>;

    /// Find a message by id.
    async fn find_by_id(&self, id: &MessageId) -> Result<Option<BoardMessage>, BoardError>;

    /// Delete a message, enforcing ownership.
    ///
    /// Fails with [`BoardError::NotFound`] if no such message exists and
    /// [`BoardError::Forbidden`] if it belongs to a different user.
    async fn delete(&self, id: &MessageId, user_id: &UserId) -> Result<(), BoardError>;
}
