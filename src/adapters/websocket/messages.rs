//! WebSocket message types for real-time text processing.
//!
//! Defines the protocol between server and connected clients:
//! - Server to client: connection status, processing lifecycle events,
//!   streamed chunks, errors, pings
//! - Client to server: text to process, pings

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::processing::ProcessingPlan;

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
///
/// These are what room broadcasts carry, so every variant is `Clone`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established and session room joined.
    Connected(ConnectedMessage),

    /// A processing turn has started; carries the step-one plan.
    ProcessingStart(ProcessingStartMessage),

    /// A streamed chunk of the in-flight response.
    ProcessingUpdate(ProcessingUpdateMessage),

    /// The turn finished; carries the full response.
    ProcessingComplete(ProcessingCompleteMessage),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

impl ServerMessage {
    /// Builds a `connected` message for a freshly joined client.
    pub fn connected(session_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self::Connected(ConnectedMessage {
            session_id: session_id.into(),
            client_id: client_id.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    /// Builds a `processing_start` message.
    pub fn processing_start(plan: ProcessingPlan) -> Self {
        Self::ProcessingStart(ProcessingStartMessage {
            plan,
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    /// Builds a `processing_update` message carrying one chunk.
    pub fn processing_update(chunk: impl Into<String>) -> Self {
        Self::ProcessingUpdate(ProcessingUpdateMessage {
            chunk: chunk.into(),
        })
    }

    /// Builds a `processing_complete` message.
    pub fn processing_complete(plan: ProcessingPlan, response: impl Into<String>) -> Self {
        Self::ProcessingComplete(ProcessingCompleteMessage {
            plan,
            response: response.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    /// Builds an `error` message.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error(ErrorMessage {
            code: code.into(),
            message: message.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    /// Builds a `pong` message.
    pub fn pong() -> Self {
        Self::Pong(PongMessage {
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }
}

/// Sent when a client successfully connects and joins a session room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub session_id: String,
    pub client_id: String,
    pub timestamp: String,
}

/// A processing turn began.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingStartMessage {
    pub plan: ProcessingPlan,
    pub timestamp: String,
}

/// One streamed chunk of the response being generated.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingUpdateMessage {
    pub chunk: String,
}

/// A processing turn completed.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingCompleteMessage {
    pub plan: ProcessingPlan,
    pub response: String,
    pub timestamp: String,
}

/// Error message sent to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Run the processing pipeline on the given text.
    ProcessText { text: String },

    /// Heartbeat request.
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_serializes_with_type_tag() {
        let msg = ServerMessage::connected("session-123", "client-456");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"connected""#));
        assert!(json.contains(r#""sessionId":"session-123""#));
        assert!(json.contains(r#""clientId":"client-456""#));
    }

    #[test]
    fn processing_start_carries_plan() {
        let msg = ServerMessage::processing_start(ProcessingPlan::for_text("1 2 3"));
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"processing_start""#));
        assert!(json.contains(r#""title":"1 2 3...""#));
        assert!(json.contains(r#""status":"planned""#));
    }

    #[test]
    fn processing_update_carries_chunk() {
        let msg = ServerMessage::processing_update("You ");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"processing_update""#));
        assert!(json.contains(r#""chunk":"You ""#));
    }

    #[test]
    fn processing_complete_carries_response() {
        let plan = ProcessingPlan::for_text("42").completed();
        let msg = ServerMessage::processing_complete(plan, "You entered: 42");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"processing_complete""#));
        assert!(json.contains(r#""response":"You entered: 42""#));
        assert!(json.contains(r#""status":"completed""#));
    }

    #[test]
    fn error_serializes_code_and_message() {
        let msg = ServerMessage::error("AI_PROVIDER_ERROR", "provider unavailable");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"error""#));
        assert!(json.contains(r#""code":"AI_PROVIDER_ERROR""#));
    }

    #[test]
    fn client_message_deserializes_process_text() {
        let json = r#"{"type": "process_text", "text": "42"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::ProcessText { text } if text == "42"));
    }

    #[test]
    fn client_message_deserializes_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn client_message_rejects_unknown_type() {
        let json = r#"{"type": "shutdown"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }
}
