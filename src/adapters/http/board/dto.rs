//! HTTP DTOs for the message board endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::board::BoardMessage;

// ----- Request DTOs -----

/// Request to post a new message.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    pub text: String,
}

// ----- Response DTOs -----

/// A board message as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub user_id: String,
    pub author: String,
    pub text: String,
    pub created_at: String,
}

impl From<BoardMessage> for MessageResponse {
    fn from(message: BoardMessage) -> Self {
        Self {
            id: message.id.as_i64(),
            user_id: message.user_id.to_string(),
            author: message.author,
            text: message.text,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}

/// The board feed.
#[derive(Debug, Clone, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}

/// Response after deleting a message.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteMessageResponse {
    pub id: i64,
    pub message: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            code: "FORBIDDEN".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
