//! In-memory session store.
//!
//! Session state is conversational scratch space, not durable data, so the
//! default store is a process-local map. State is lost on restart, which
//! matches the session lifecycle: clients reconnect with a fresh session.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::processing::SessionState;
use crate::ports::SessionStore;

/// Process-local SessionStore backed by a HashMap.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionState>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &SessionId) -> SessionState {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn save(&self, session_id: &SessionId, state: SessionState) {
        self.sessions.write().await.insert(*session_id, state);
    }

    async fn delete(&self, session_id: &SessionId) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_unknown_session_returns_empty_state() {
        let store = InMemorySessionStore::new();
        let state = store.get(&SessionId::new()).await;
        assert!(state.history.is_empty());
        assert!(state.last_response.is_empty());
    }

    #[tokio::test]
    async fn save_then_get_roundtrips() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let mut state = SessionState::new();
        state.record_exchange("prompt", "1", "You entered: 1");
        store.save(&id, state.clone()).await;

        assert_eq!(store.get(&id).await, state);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        assert!(!store.delete(&id).await);

        store.save(&id, SessionState::new()).await;
        assert!(store.delete(&id).await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        let a = SessionId::new();
        let b = SessionId::new();

        let mut state = SessionState::new();
        state.record_exchange("prompt", "1", "You entered: 1");
        store.save(&a, state).await;

        assert!(store.get(&b).await.history.is_empty());
    }
}
