//! Board command and query handlers.

mod delete_message;
mod get_message;
mod list_messages;
mod post_message;

pub use delete_message::{DeleteMessageCommand, DeleteMessageHandler};
pub use get_message::{GetMessageHandler, GetMessageQuery};
pub use list_messages::ListMessagesHandler;
pub use post_message::{PostMessageCommand, PostMessageHandler};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::board::{BoardError, BoardMessage, NewMessage};
    use crate::domain::foundation::{AuthenticatedUser, MessageId, Timestamp, UserId};
    use crate::ports::MessageRepository;

    pub fn test_user(id: &str, email: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(id).unwrap(),
            email: email.to_string(),
            created_at: None,
        }
    }

    /// In-memory repository double with the same ownership semantics as the
    /// Postgres adapter.
    pub struct MockMessageRepository {
        messages: Mutex<Vec<BoardMessage>>,
        next_id: Mutex<i64>,
    }

    impl MockMessageRepository {
        pub fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
                next_id: Mutex::new(1),
            }
        }

        pub fn stored(&self) -> Vec<BoardMessage> {
            self.messages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageRepository for MockMessageRepository {
        async fn insert(&self, message: NewMessage) -> Result<BoardMessage, BoardError> {
            let mut next_id = self.next_id.lock().unwrap();
            let stored = BoardMessage {
                id: MessageId::from_i64(*next_id),
                user_id: message.user_id,
                author: message.author,
                text: message.text,
                created_at: Timestamp::now(),
            };
            *next_id += 1;
            self.messages.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn list_all(&self) -> Result<Vec<BoardMessage>, BoardError> {
            let mut all = self.messages.lock().unwrap().clone();
            all.reverse();
            Ok(all)
        }

        async fn find_by_id(&self, id: &MessageId) -> Result<Option<BoardMessage>, BoardError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id == *id)
                .cloned())
        }

        async fn delete(&self, id: &MessageId, user_id: &UserId) -> Result<(), BoardError> {
            let mut messages = self.messages.lock().unwrap();
            let Some(pos) = messages.iter().position(|m| m.id == *id) else {
                return Err(BoardError::NotFound);
            };
            if messages[pos].user_id != *user_id {
                return Err(BoardError::Forbidden);
            }
            messages.remove(pos);
            Ok(())
        }
    }
}
