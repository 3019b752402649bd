//! PostMessageHandler - command handler for posting board messages.

use std::sync::Arc;

use crate::domain::board::{BoardError, BoardMessage, NewMessage};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::MessageRepository;

/// Command to post a message to the board.
#[derive(Debug, Clone)]
pub struct PostMessageCommand {
    pub user: AuthenticatedUser,
    pub text: String,
}

pub struct PostMessageHandler {
    repository: Arc<dyn MessageRepository>,
}

impl PostMessageHandler {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: PostMessageCommand) -> Result<BoardMessage, BoardError> {
        let message = NewMessage::new(cmd.user.id, &cmd.user.email, &cmd.text)?;
        self.repository.insert(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::board::test_support::{test_user, MockMessageRepository};

    #[tokio::test]
    async fn posts_message_with_author_from_email() {
        let repo = Arc::new(MockMessageRepository::new());
        let handler = PostMessageHandler::new(repo.clone());

        let message = handler
            .handle(PostMessageCommand {
                user: test_user("u-1", "alice@example.com"),
                text: "hello board".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(message.author, "alice@example.com");
        assert_eq!(message.text, "hello board");
        assert_eq!(repo.stored().len(), 1);
    }

    #[tokio::test]
    async fn rejects_blank_text() {
        let repo = Arc::new(MockMessageRepository::new());
        let handler = PostMessageHandler::new(repo.clone());

        let result = handler
            .handle(PostMessageCommand {
                user: test_user("u-1", "alice@example.com"),
                text: "   ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BoardError::EmptyText)));
        assert!(repo.stored().is_empty());
    }
}
