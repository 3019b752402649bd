//! HTTP handlers for the message board endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::board::{
    DeleteMessageCommand, DeleteMessageHandler, GetMessageHandler, GetMessageQuery,
    ListMessagesHandler, PostMessageCommand, PostMessageHandler,
};
use crate::domain::board::BoardError;
use crate::domain::foundation::MessageId;

use super::dto::{
    DeleteMessageResponse, ErrorResponse, MessageListResponse, MessageResponse, PostMessageRequest,
};

#[derive(Clone)]
pub struct BoardHandlers {
    post_handler: Arc<PostMessageHandler>,
    list_handler: Arc<ListMessagesHandler>,
    get_handler: Arc<GetMessageHandler>,
    delete_handler: Arc<DeleteMessageHandler>,
}

impl BoardHandlers {
    pub fn new(
        post_handler: Arc<PostMessageHandler>,
        list_handler: Arc<ListMessagesHandler>,
        get_handler: Arc<GetMessageHandler>,
        delete_handler: Arc<DeleteMessageHandler>,
    ) -> Self {
        Self {
            post_handler,
            list_handler,
            get_handler,
            delete_handler,
        }
    }
}

/// POST /api/message - Post a message to the board
pub async fn post_message(
    State(handlers): State<BoardHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<PostMessageRequest>,
) -> Response {
    let cmd = PostMessageCommand {
        user,
        text: req.text,
    };

    match handlers.post_handler.handle(cmd).await {
        Ok(message) => {
            let response: MessageResponse = message.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_board_error(e),
    }
}

/// GET /api/messages - List all messages, newest first. Publicly readable.
pub async fn list_messages(State(handlers): State<BoardHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(messages) => {
            let response = MessageListResponse {
                messages: messages.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_board_error(e),
    }
}

/// GET /api/messages/:id - Get a single message. Publicly readable.
pub async fn get_message(
    State(handlers): State<BoardHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id = match id.parse::<MessageId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid message ID")),
            )
                .into_response()
        }
    };

    match handlers.get_handler.handle(GetMessageQuery { id }).await {
        Ok(message) => {
            let response: MessageResponse = message.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_board_error(e),
    }
}

/// DELETE /api/messages/:id - Delete an owned message
pub async fn delete_message(
    State(handlers): State<BoardHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let id = match id.parse::<MessageId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid message ID")),
            )
                .into_response()
        }
    };

    let cmd = DeleteMessageCommand {
        id,
        user_id: user.id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => {
            let response = DeleteMessageResponse {
                id: id.as_i64(),
                message: "Message deleted".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_board_error(e),
    }
}

fn handle_board_error(error: BoardError) -> Response {
    match error {
        BoardError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Message", "requested id")),
        )
            .into_response(),
        BoardError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("You can only delete your own messages")),
        )
            .into_response(),
        BoardError::EmptyText => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Message text cannot be empty")),
        )
            .into_response(),
        BoardError::Infrastructure(msg) => {
            tracing::error!("board storage error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Storage error")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_error_not_found_maps_to_404() {
        let response = handle_board_error(BoardError::NotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn board_error_forbidden_maps_to_403() {
        let response = handle_board_error(BoardError::Forbidden);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn board_error_empty_text_maps_to_400() {
        let response = handle_board_error(BoardError::EmptyText);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn board_error_infrastructure_maps_to_500() {
        let response = handle_board_error(BoardError::Infrastructure("db down".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
