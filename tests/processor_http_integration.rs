//! Integration tests for the text-processor HTTP endpoints.
//!
//! Routes are exercised end to end through the router with a mock AI
//! provider and the in-memory session store, covering the two-step
//! pipeline, session continuity, and error mapping.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use quillboard::adapters::ai::MockProvider;
use quillboard::adapters::http::{processor_routes, ProcessorHandlers};
use quillboard::adapters::storage::InMemorySessionStore;
use quillboard::application::handlers::processing::{
    ClearSessionHandler, GetSessionStateHandler, ProcessTextHandler,
};
use quillboard::domain::foundation::SessionId;
use quillboard::domain::processing::ProcessingService;
use quillboard::ports::AiError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(provider: MockProvider) -> Router {
    let service = Arc::new(ProcessingService::new(
        Arc::new(provider),
        Arc::new(InMemorySessionStore::new()),
    ));

    let handlers = ProcessorHandlers::new(
        Arc::new(ProcessTextHandler::new(service.clone())),
        Arc::new(GetSessionStateHandler::new(service.clone())),
        Arc::new(ClearSessionHandler::new(service)),
    );

    processor_routes(handlers)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn process_returns_plan_and_response() {
    let app = app(MockProvider::new().with_response("You entered: 9"));

    let (status, body) = send_json(&app, "POST", "/process", Some(json!({"text": "9"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "You entered: 9");
    assert_eq!(body["plan"]["title"], "9...");
    assert_eq!(body["plan"]["status"], "completed");
}

#[tokio::test]
async fn empty_input_yields_canned_response_without_provider_call() {
    let app = app(MockProvider::new());

    let (status, body) = send_json(&app, "POST", "/process", Some(json!({"text": ""}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Please enter a number.");
    assert_eq!(body["plan"]["status"], "planned");
}

#[tokio::test]
async fn non_numeric_input_yields_canned_response() {
    let app = app(MockProvider::new());

    let (status, body) =
        send_json(&app, "POST", "/process", Some(json!({"text": "hello"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Please provide a valid number.");
}

#[tokio::test]
async fn session_state_accumulates_across_requests() {
    let app = app(
        MockProvider::new()
            .with_response("You entered: 1")
            .with_response("1 + 2 = 3"),
    );
    let session_id = SessionId::new().to_string();

    send_json(
        &app,
        "POST",
        "/process",
        Some(json!({"text": "1", "session_id": session_id})),
    )
    .await;
    let (_, second) = send_json(
        &app,
        "POST",
        "/process",
        Some(json!({"text": "2", "session_id": session_id})),
    )
    .await;
    assert_eq!(second["response"], "1 + 2 = 3");

    let (status, state) =
        send_json(&app, "GET", &format!("/session/{}", session_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["last_response"], "1 + 2 = 3");
    // system prompt + two user/assistant exchanges
    assert_eq!(state["history"].as_array().unwrap().len(), 5);
    assert_eq!(state["history"][0]["role"], "system");
}

#[tokio::test]
async fn unknown_session_returns_empty_state() {
    let app = app(MockProvider::new());
    let session_id = SessionId::new().to_string();

    let (status, state) =
        send_json(&app, "GET", &format!("/session/{}", session_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["history"].as_array().unwrap().len(), 0);
    assert_eq!(state["last_response"], "");
}

#[tokio::test]
async fn malformed_session_id_is_rejected() {
    let app = app(MockProvider::new());

    let (status, body) = send_json(
        &app,
        "POST",
        "/process",
        Some(json!({"text": "1", "session_id": "not-a-uuid"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, _) = send_json(&app, "GET", "/session/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn provider_failure_maps_to_bad_gateway() {
    let app = app(MockProvider::new().with_error(AiError::unavailable("provider offline")));

    let (status, body) = send_json(&app, "POST", "/process", Some(json!({"text": "5"}))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "AI_PROVIDER_ERROR");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("I encountered an AI processing issue"));
}

#[tokio::test]
async fn clear_session_reports_whether_it_existed() {
    let app = app(MockProvider::new().with_response("You entered: 1"));
    let session_id = SessionId::new().to_string();

    let (status, body) =
        send_json(&app, "DELETE", &format!("/session/{}", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleared"], false);

    send_json(
        &app,
        "POST",
        "/process",
        Some(json!({"text": "1", "session_id": session_id})),
    )
    .await;

    let (_, body) =
        send_json(&app, "DELETE", &format!("/session/{}", session_id), None).await;
    assert_eq!(body["cleared"], true);

    let (_, state) =
        send_json(&app, "GET", &format!("/session/{}", session_id), None).await;
    assert_eq!(state["history"].as_array().unwrap().len(), 0);
}
