//! ClearSessionHandler - command handler for dropping session state.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::processing::ProcessingService;

/// Command to discard a session's conversation state.
#[derive(Debug, Clone)]
pub struct ClearSessionCommand {
    pub session_id: SessionId,
}

/// Result of clearing a session.
#[derive(Debug, Clone)]
pub struct ClearSessionResult {
    /// Whether any state existed for the session.
    pub existed: bool,
}

pub struct ClearSessionHandler {
    service: Arc<ProcessingService>,
}

impl ClearSessionHandler {
    pub fn new(service: Arc<ProcessingService>) -> Self {
        Self { service }
    }

    pub async fn handle(&self, cmd: ClearSessionCommand) -> ClearSessionResult {
        let existed = self.service.clear_session(&cmd.session_id).await;
        ClearSessionResult { existed }
    }
}
