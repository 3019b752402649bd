//! HTTP DTOs for the text-processor endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::processing::{PlanStatus, ProcessingOutcome, ProcessingPlan, SessionState};
use crate::ports::{Message, MessageRole};

// ----- Request DTOs -----

/// Request to process a text input.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessTextRequest {
    pub text: String,
    /// Optional session to continue. Omitted for stateless requests.
    #[serde(default)]
    pub session_id: Option<String>,
}

// ----- Response DTOs -----

/// The plan produced by the analysis step.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub title: String,
    pub status: PlanStatus,
}

impl From<ProcessingPlan> for PlanResponse {
    fn from(plan: ProcessingPlan) -> Self {
        Self {
            title: plan.title,
            status: plan.status,
        }
    }
}

/// Response for a processed text input.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessTextResponse {
    pub plan: PlanResponse,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl From<ProcessingOutcome> for ProcessTextResponse {
    fn from(outcome: ProcessingOutcome) -> Self {
        Self {
            plan: outcome.plan.into(),
            response: outcome.response,
            session_id: outcome.session_id.map(|id| id.to_string()),
        }
    }
}

/// A single message in the session history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
}

impl From<&Message> for HistoryEntry {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

/// Current state of a processing session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStateResponse {
    pub session_id: String,
    pub last_response: String,
    pub history: Vec<HistoryEntry>,
}

impl SessionStateResponse {
    pub fn from_state(session_id: String, state: SessionState) -> Self {
        Self {
            session_id,
            last_response: state.last_response,
            history: state.history.iter().map(HistoryEntry::from).collect(),
        }
    }
}

/// Response after clearing a session.
#[derive(Debug, Clone, Serialize)]
pub struct ClearSessionResponse {
    pub session_id: String,
    pub cleared: bool,
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

    pub fn provider_error(message: impl Into<String>) -> Self {
        Self {
            code: "AI_PROVIDER_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
