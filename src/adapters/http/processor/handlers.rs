//! HTTP handlers for the text-processor endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::processing::{
    ClearSessionCommand, ClearSessionHandler, GetSessionStateHandler, GetSessionStateQuery,
    ProcessTextCommand, ProcessTextHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::processing::ProcessingError;

use super::dto::{
    ClearSessionResponse, ErrorResponse, ProcessTextRequest, ProcessTextResponse,
    SessionStateResponse,
};

#[derive(Clone)]
pub struct ProcessorHandlers {
    process_handler: Arc<ProcessTextHandler>,
    state_handler: Arc<GetSessionStateHandler>,
    clear_handler: Arc<ClearSessionHandler>,
}

impl ProcessorHandlers {
    pub fn new(
        process_handler: Arc<ProcessTextHandler>,
        state_handler: Arc<GetSessionStateHandler>,
        clear_handler: Arc<ClearSessionHandler>,
    ) -> Self {
        Self {
            process_handler,
            state_handler,
            clear_handler,
        }
    }
}

/// POST /experiments/text-processor/api/process - Process a text input
pub async fn process_text(
    State(handlers): State<ProcessorHandlers>,
    Json(req): Json<ProcessTextRequest>,
) -> Response {
    let session_id = match req.session_id.as_deref() {
        Some(raw) => match raw.parse::<SessionId>() {
            Ok(id) => Some(id),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request("Invalid session ID")),
                )
                    .into_response()
            }
        },
        None => None,
    };

    let cmd = ProcessTextCommand {
        text: req.text,
        session_id,
    };

    match handlers.process_handler.handle(cmd).await {
        Ok(outcome) => {
            let response: ProcessTextResponse = outcome.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_processing_error(e),
    }
}

/// GET /experiments/text-processor/api/session/:id - Get session state
pub async fn get_session_state(
    State(handlers): State<ProcessorHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let state = handlers
        .state_handler
        .handle(GetSessionStateQuery { session_id })
        .await;

    let response = SessionStateResponse::from_state(session_id.to_string(), state);
    (StatusCode::OK, Json(response)).into_response()
}

/// DELETE /experiments/text-processor/api/session/:id - Clear session state
pub async fn clear_session(
    State(handlers): State<ProcessorHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let result = handlers
        .clear_handler
        .handle(ClearSessionCommand { session_id })
        .await;

    let response = ClearSessionResponse {
        session_id: session_id.to_string(),
        cleared: result.existed,
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn handle_processing_error(error: ProcessingError) -> Response {
    match &error {
        ProcessingError::Provider(e) => {
            tracing::error!(error = %e, "AI provider call failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::provider_error(error.user_message())),
            )
                .into_response()
        }
    }
}
