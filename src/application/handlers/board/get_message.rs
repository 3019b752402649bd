//! GetMessageHandler - query handler for a single board message.

use std::sync::Arc;

use crate::domain::board::{BoardError, BoardMessage};
use crate::domain::foundation::MessageId;
use crate::ports::MessageRepository;

/// Query for one message by id.
#[derive(Debug, Clone)]
pub struct GetMessageQuery {
    pub id: MessageId,
}

pub struct GetMessageHandler {
    repository: Arc<dyn MessageRepository>,
}

impl GetMessageHandler {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetMessageQuery) -> Result<BoardMessage, BoardError> {
        self.repository
            .find_by_id(&query.id)
            .await?
            .ok_or(BoardError::NotFound)
    }
}
