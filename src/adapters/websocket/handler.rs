//! WebSocket upgrade handler for real-time text processing.
//!
//! Connection lifecycle:
//! 1. Parse the session ID from the path and upgrade
//! 2. Join the session room and confirm with a `connected` message
//! 3. Forward room broadcasts to the client while accepting input
//! 4. Each `process_text` runs as its own task, broadcasting lifecycle
//!    events and chunks to the whole room
//! 5. Leave the room on disconnect

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::domain::foundation::SessionId;
use crate::domain::processing::{ProcessingError, ProcessingService, Turn};

use super::{
    messages::{ClientMessage, ServerMessage},
    rooms::{ClientId, RoomManager},
};

/// Shared state for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    pub service: Arc<ProcessingService>,
    pub rooms: Arc<RoomManager>,
}

impl WebSocketState {
    pub fn new(service: Arc<ProcessingService>, rooms: Arc<RoomManager>) -> Self {
        Self { service, rooms }
    }
}

/// Handles WebSocket upgrade requests.
///
/// Route: `GET /experiments/text-processor/ws/:session_id`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<WebSocketState>,
) -> Response {
    let session_id: SessionId = match session_id.parse() {
        Ok(id) => id,
        Err(_) => return (StatusCode::BAD_REQUEST, "Invalid session ID").into_response(),
    };

    ws.on_upgrade(move |socket| handle_socket(socket, session_id, state))
}

/// Runs for the lifetime of one connection.
async fn handle_socket(socket: WebSocket, session_id: SessionId, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let client_id = ClientId::new();
    let mut room_rx = state.rooms.join(&session_id, client_id.clone()).await;

    tracing::debug!(session_id = %session_id, client_id = %client_id, "websocket client connected");

    let connected = ServerMessage::connected(session_id.to_string(), client_id.to_string());
    if send_message(&mut sender, &connected).await.is_err() {
        // Client disconnected before the handshake finished
        state.rooms.leave(&client_id).await;
        return;
    }

    loop {
        tokio::select! {
            update = room_rx.recv() => match update {
                Ok(message) => {
                    if send_message(&mut sender, &message).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(
                        client_id = %client_id,
                        missed,
                        "client lagged behind room broadcasts"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    handle_client_text(&text, session_id, &state, &mut sender).await;
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!(client_id = %client_id, "client disconnected");
                    break;
                }
                Some(Ok(_)) => {
                    // Binary and protocol-level ping/pong frames are ignored
                }
                Some(Err(e)) => {
                    tracing::debug!(client_id = %client_id, "receive error: {}", e);
                    break;
                }
            },
        }
    }

    state.rooms.leave(&client_id).await;
}

/// Dispatches one text frame from the client.
async fn handle_client_text(
    text: &str,
    session_id: SessionId,
    state: &WebSocketState,
    sender: &mut SplitSink<WebSocket, Message>,
) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::ProcessText { text }) => {
            // The turn runs in its own task so this connection keeps
            // receiving room broadcasts (including its own chunks)
            // while the provider streams.
            let service = state.service.clone();
            let rooms = state.rooms.clone();
            tokio::spawn(async move {
                run_processing_turn(service, rooms, session_id, text).await;
            });
        }
        Ok(ClientMessage::Ping) => {
            // Pong goes to this client only, not the room
            let _ = send_message(sender, &ServerMessage::pong()).await;
        }
        Err(_) => {
            let _ = send_message(
                sender,
                &ServerMessage::error("INVALID_MESSAGE", "Unrecognized message"),
            )
            .await;
        }
    }
}

/// Drives one processing turn, broadcasting its lifecycle to the room.
async fn run_processing_turn(
    service: Arc<ProcessingService>,
    rooms: Arc<RoomManager>,
    session_id: SessionId,
    text: String,
) {
    let turn = match service.begin_streaming(&text, session_id).await {
        Ok(turn) => turn,
        Err(e) => {
            tracing::error!(session_id = %session_id, "processing failed: {}", e);
            rooms
                .broadcast(
                    &session_id,
                    ServerMessage::error("AI_PROVIDER_ERROR", e.user_message()),
                )
                .await;
            return;
        }
    };

    match turn {
        Turn::Canned(outcome) => {
            rooms
                .broadcast(
                    &session_id,
                    ServerMessage::processing_start(outcome.plan.clone()),
                )
                .await;
            rooms
                .broadcast(
                    &session_id,
                    ServerMessage::processing_complete(outcome.plan, outcome.response),
                )
                .await;
        }
        Turn::Streaming { plan, mut stream } => {
            rooms
                .broadcast(&session_id, ServerMessage::processing_start(plan.clone()))
                .await;

            let mut full = String::new();
            while let Some(item) = stream.next().await {
                match item {
                    Ok(chunk) => {
                        // Read the terminator flag before the delta is moved
                        // into the broadcast envelope.
                        let is_final = chunk.is_final();
                        if !chunk.delta.is_empty() {
                            full.push_str(&chunk.delta);
                            rooms
                                .broadcast(
                                    &session_id,
                                    ServerMessage::processing_update(chunk.delta),
                                )
                                .await;
                        }
                        if is_final {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(session_id = %session_id, "stream failed: {}", e);
                        rooms
                            .broadcast(
                                &session_id,
                                ServerMessage::error(
                                    "AI_PROVIDER_ERROR",
                                    ProcessingError::from(e).user_message(),
                                ),
                            )
                            .await;
                        return;
                    }
                }
            }

            let response = ProcessingService::finalize_response(&full);
            service.finish_exchange(&session_id, &text, &response).await;

            rooms
                .broadcast(
                    &session_id,
                    ServerMessage::processing_complete(plan, response),
                )
                .await;
        }
    }
}

/// Sends one JSON-encoded message over the socket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).expect("ServerMessage serialization should not fail");
    sender.send(Message::Text(json)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockProvider;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::ports::AiError;

    fn state_with(provider: MockProvider) -> WebSocketState {
        let service = Arc::new(ProcessingService::new(
            Arc::new(provider),
            Arc::new(InMemorySessionStore::new()),
        ));
        WebSocketState::new(service, Arc::new(RoomManager::default()))
    }

    async fn collect_room_messages(
        rx: &mut broadcast::Receiver<ServerMessage>,
    ) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    #[tokio::test]
    async fn turn_broadcasts_start_chunks_and_complete() {
        let state = state_with(MockProvider::new().with_response("You entered: 9"));
        let session_id = SessionId::new();
        let mut rx = state.rooms.join(&session_id, ClientId::new()).await;

        run_processing_turn(
            state.service.clone(),
            state.rooms.clone(),
            session_id,
            "9".to_string(),
        )
        .await;

        let messages = collect_room_messages(&mut rx).await;
        assert!(matches!(messages.first(), Some(ServerMessage::ProcessingStart(_))));
        assert!(matches!(messages.last(), Some(ServerMessage::ProcessingComplete(_))));

        let chunks: String = messages
            .iter()
            .filter_map(|m| match m {
                ServerMessage::ProcessingUpdate(u) => Some(u.chunk.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(chunks, "You entered: 9");

        // The exchange was recorded against the session
        let session_state = state.service.session_state(&session_id).await;
        assert_eq!(session_state.last_response, "You entered: 9");
    }

    #[tokio::test]
    async fn final_chunk_terminates_the_turn_without_an_empty_update() {
        let state = state_with(MockProvider::new().with_response("You entered: 9"));
        let session_id = SessionId::new();
        let mut rx = state.rooms.join(&session_id, ClientId::new()).await;

        run_processing_turn(
            state.service.clone(),
            state.rooms.clone(),
            session_id,
            "9".to_string(),
        )
        .await;

        let messages = collect_room_messages(&mut rx).await;
        let updates: Vec<&str> = messages
            .iter()
            .filter_map(|m| match m {
                ServerMessage::ProcessingUpdate(u) => Some(u.chunk.as_str()),
                _ => None,
            })
            .collect();

        // One update per word; the empty final chunk is consumed, not sent
        assert_eq!(updates, vec!["You ", "entered: ", "9"]);
        assert!(matches!(messages.last(), Some(ServerMessage::ProcessingComplete(_))));
    }

    #[tokio::test]
    async fn invalid_input_broadcasts_canned_complete_without_chunks() {
        let state = state_with(MockProvider::new());
        let session_id = SessionId::new();
        let mut rx = state.rooms.join(&session_id, ClientId::new()).await;

        run_processing_turn(
            state.service.clone(),
            state.rooms.clone(),
            session_id,
            "not a number".to_string(),
        )
        .await;

        let messages = collect_room_messages(&mut rx).await;
        assert_eq!(messages.len(), 2);
        match &messages[1] {
            ServerMessage::ProcessingComplete(complete) => {
                assert_eq!(complete.response, "Please provide a valid number.");
            }
            other => panic!("expected processing_complete, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn provider_failure_broadcasts_error() {
        let state = state_with(MockProvider::new().with_error(AiError::unavailable("offline")));
        let session_id = SessionId::new();
        let mut rx = state.rooms.join(&session_id, ClientId::new()).await;

        run_processing_turn(
            state.service.clone(),
            state.rooms.clone(),
            session_id,
            "5".to_string(),
        )
        .await;

        let messages = collect_room_messages(&mut rx).await;
        assert!(messages
            .iter()
            .any(|m| matches!(m, ServerMessage::Error(e) if e.code == "AI_PROVIDER_ERROR")));

        // A failed turn never touches the session history
        let session_state = state.service.session_state(&session_id).await;
        assert!(session_state.history.is_empty());
    }
}
