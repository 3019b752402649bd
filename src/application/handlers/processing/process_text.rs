//! ProcessTextHandler - runs the two-step pipeline for a text input.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::processing::{ProcessingError, ProcessingOutcome, ProcessingService};

/// Command to process a text input.
#[derive(Debug, Clone)]
pub struct ProcessTextCommand {
    pub text: String,
    /// Session to record the exchange under. When absent the request is
    /// stateless and no history is consulted or written.
    pub session_id: Option<SessionId>,
}

/// Handler for synchronous text processing.
pub struct ProcessTextHandler {
    service: Arc<ProcessingService>,
}

impl ProcessTextHandler {
    pub fn new(service: Arc<ProcessingService>) -> Self {
        Self { service }
    }

    pub async fn handle(
        &self,
        cmd: ProcessTextCommand,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        self.service.process(&cmd.text, cmd.session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockProvider;
    use crate::adapters::storage::InMemorySessionStore;

    fn handler(provider: MockProvider) -> ProcessTextHandler {
        let service = ProcessingService::new(
            Arc::new(provider),
            Arc::new(InMemorySessionStore::new()),
        );
        ProcessTextHandler::new(Arc::new(service))
    }

    #[tokio::test]
    async fn stateless_request_processes_without_session() {
        let handler = handler(MockProvider::new().with_response("You entered: 3"));
        let outcome = handler
            .handle(ProcessTextCommand {
                text: "3".to_string(),
                session_id: None,
            })
            .await
            .unwrap();
        assert_eq!(outcome.response, "You entered: 3");
        assert!(outcome.session_id.is_none());
    }

    #[tokio::test]
    async fn session_id_is_echoed_back() {
        let handler = handler(MockProvider::new().with_response("You entered: 3"));
        let session = SessionId::new();
        let outcome = handler
            .handle(ProcessTextCommand {
                text: "3".to_string(),
                session_id: Some(session),
            })
            .await
            .unwrap();
        assert_eq!(outcome.session_id, Some(session));
    }
}
