//! DeleteMessageHandler - command handler for removing a board message.

use std::sync::Arc;

use crate::domain::board::BoardError;
use crate::domain::foundation::{MessageId, UserId};
use crate::ports::MessageRepository;

/// Command to delete a message. Only the owner may delete.
#[derive(Debug, Clone)]
pub struct DeleteMessageCommand {
    pub id: MessageId,
    pub user_id: UserId,
}

pub struct DeleteMessageHandler {
    repository: Arc<dyn MessageRepository>,
}

impl DeleteMessageHandler {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteMessageCommand) -> Result<(), BoardError> {
        self.repository.delete(&cmd.id, &cmd.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::board::test_support::{test_user, MockMessageRepository};
    use crate::application::handlers::board::{PostMessageCommand, PostMessageHandler};

    #[tokio::test]
    async fn owner_can_delete_own_message() {
        let repo = Arc::new(MockMessageRepository::new());
        let post = PostMessageHandler::new(repo.clone());
        let delete = DeleteMessageHandler::new(repo.clone());

        let user = test_user("u-1", "alice@example.com");
        let message = post
            .handle(PostMessageCommand {
                user: user.clone(),
                text: "mine".to_string(),
            })
            .await
            .unwrap();

        delete
            .handle(DeleteMessageCommand {
                id: message.id,
                user_id: user.id,
            })
            .await
            .unwrap();
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let repo = Arc::new(MockMessageRepository::new());
        let post = PostMessageHandler::new(repo.clone());
        let delete = DeleteMessageHandler::new(repo.clone());

        let message = post
            .handle(PostMessageCommand {
                user: test_user("u-1", "alice@example.com"),
                text: "mine".to_string(),
            })
            .await
            .unwrap();

        let result = delete
            .handle(DeleteMessageCommand {
                id: message.id,
                user_id: test_user("u-2", "bob@example.com").id,
            })
            .await;

        assert!(matches!(result, Err(BoardError::Forbidden)));
        assert_eq!(repo.stored().len(), 1);
    }

    #[tokio::test]
    async fn deleting_missing_message_is_not_found() {
        let delete = DeleteMessageHandler::new(Arc::new(MockMessageRepository::new()));
        let result = delete
            .handle(DeleteMessageCommand {
                id: MessageId::from_i64(404),
                user_id: test_user("u-1", "alice@example.com").id,
            })
            .await;
        assert!(matches!(result, Err(BoardError::NotFound)));
    }
}
