//! ListMessagesHandler - query handler for the board feed.

use std::sync::Arc;

use crate::domain::board::{BoardError, BoardMessage};
use crate::ports::MessageRepository;

pub struct ListMessagesHandler {
    repository: Arc<dyn MessageRepository>,
}

impl ListMessagesHandler {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// Returns all messages, newest first.
    pub async fn handle(&self) -> Result<Vec<BoardMessage>, BoardError> {
        self.repository.list_all().await
    }
}
