//! Session Store Port - session-scoped conversation state.
//!
//! The text-processing experiment keeps a small amount of conversational
//! context per session (last response plus a capped history). This port
//! abstracts where that state lives; the default adapter is in-memory.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::processing::SessionState;

/// Port for session-scoped processing state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get session state by ID, creating empty state if it doesn't exist.
    async fn get(&self, session_id: &SessionId) -> SessionState;

    /// Save session state, replacing any previous value.
    async fn save(&self, session_id: &SessionId, state: SessionState);

    /// Delete a session. Returns true if the session existed.
    async fn delete(&self, session_id: &SessionId) -> bool;
}
