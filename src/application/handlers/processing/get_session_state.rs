//! GetSessionStateHandler - query handler for session state.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::processing::{ProcessingService, SessionState};

/// Query for the current state of a processing session.
#[derive(Debug, Clone)]
pub struct GetSessionStateQuery {
    pub session_id: SessionId,
}

pub struct GetSessionStateHandler {
    service: Arc<ProcessingService>,
}

impl GetSessionStateHandler {
    pub fn new(service: Arc<ProcessingService>) -> Self {
        Self { service }
    }

    /// Unknown sessions resolve to empty state rather than an error.
    pub async fn handle(&self, query: GetSessionStateQuery) -> SessionState {
        self.service.session_state(&query.session_id).await
    }
}
