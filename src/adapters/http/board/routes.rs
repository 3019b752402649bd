//! HTTP routes for the message board endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{delete_message, get_message, list_messages, post_message, BoardHandlers};

/// Creates the board router.
pub fn board_routes(handlers: BoardHandlers) -> Router {
    Router::new()
        .route("/message", post(post_message))
        .route("/messages", get(list_messages))
        .route("/messages/:id", get(get_message).delete(delete_message))
        .with_state(handlers)
}
