//! Message board errors.

use thiserror::Error;

/// Errors from board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// No message with the given id.
    #[error("message not found")]
    NotFound,

    /// The message belongs to a different user.
    #[error("message belongs to another user")]
    Forbidden,

    /// Message body was empty or whitespace.
    #[error("message text cannot be empty")]
    EmptyText,

    /// The backing store failed.
    #[error("storage error: {0}")]
    Infrastructure(String),
}

impl From<sqlx::Error> for BoardError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => BoardError::NotFound,
            other => BoardError::Infrastructure(other.to_string()),
        }
    }
}
