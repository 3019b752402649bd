//! HTTP routes for the text-processor endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{clear_session, get_session_state, process_text, ProcessorHandlers};

/// Creates the text-processor router.
pub fn processor_routes(handlers: ProcessorHandlers) -> Router {
    Router::new()
        .route("/process", post(process_text))
        .route("/session/:id", get(get_session_state))
        .route("/session/:id", delete(clear_session))
        .with_state(handlers)
}
