//! Processing service - two-step text-transformation pipeline.
//!
//! Step one analyzes the input locally and produces a [`ProcessingPlan`].
//! Step two executes the plan against the configured AI provider with the
//! session's conversation history as context, then records the exchange.
//!
//! The demo behavior is a calculator that keeps a running total across
//! turns: the system prompt instructs the model, and the capped session
//! history supplies the previous total.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::SessionId;
use crate::ports::{AiProvider, ChunkStream, CompletionRequest, MessageRole, SessionStore};

use super::{ProcessingError, ProcessingPlan, SessionState};

/// System prompt guiding the model to act as a running-total calculator.
pub const CALCULATOR_SYSTEM_PROMPT: &str = "\
You are a calculator assistant that adds numbers. Follow these rules exactly:
1. If this is the first number in the conversation, respond with exactly: 'You entered: NUMBER'
2. For subsequent numbers, add the new number to the previous result and respond with: 'PREVIOUS_RESULT + NEW_NUMBER = NEW_RESULT'
3. Always perform addition correctly and maintain the running total
4. Do not include any extra explanations or text in your response
5. Pay close attention to the conversation history to determine the current total
6. If I give you number 1, then 2, then 3, your responses should be: 'You entered: 1', '1 + 2 = 3', '3 + 3 = 6'";

/// Result of running the pipeline.
#[derive(Debug, Clone)]
pub struct ProcessingOutcome {
    /// The plan from step one. Status is `Completed` only when the provider
    /// actually executed it.
    pub plan: ProcessingPlan,
    /// Generated (or canned) response text.
    pub response: String,
    /// Session the exchange was recorded under, if any.
    pub session_id: Option<SessionId>,
}

/// A started streaming turn.
///
/// Either the input short-circuited to a canned outcome, or the provider is
/// streaming and the caller must feed the accumulated response back through
/// [`ProcessingService::finish_exchange`] once the stream completes.
pub enum Turn {
    /// Input was rejected before reaching the provider.
    Canned(ProcessingOutcome),
    /// Provider stream in flight.
    Streaming {
        plan: ProcessingPlan,
        stream: ChunkStream,
    },
}

/// Orchestrates the two-step pipeline over the provider and session ports.
pub struct ProcessingService {
    provider: Arc<dyn AiProvider>,
    sessions: Arc<dyn SessionStore>,
    max_tokens: u32,
    temperature: f32,
}

impl ProcessingService {
    /// Creates a service with default generation settings.
    pub fn new(provider: Arc<dyn AiProvider>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            provider,
            sessions,
            max_tokens: 250,
            temperature: 0.7,
        }
    }

    /// Sets the maximum tokens per completion.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Step one: create a processing plan for the input.
    pub fn plan(text: &str) -> ProcessingPlan {
        ProcessingPlan::for_text(text)
    }

    /// Validates input, returning a canned response when the pipeline should
    /// not reach the provider.
    fn precheck(text: &str) -> Option<&'static str> {
        if text.is_empty() {
            return Some("Please enter a number.");
        }
        if text.trim().parse::<f64>().is_err() {
            return Some("Please provide a valid number.");
        }
        None
    }

    /// Builds the completion request: calculator system prompt, prior session
    /// turns (when a session is given), then the current user message.
    async fn build_request(&self, text: &str, session_id: Option<&SessionId>) -> CompletionRequest {
        let mut request = CompletionRequest::new()
            .with_system_prompt(CALCULATOR_SYSTEM_PROMPT)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        if let Some(id) = session_id {
            let state = self.sessions.get(id).await;
            for msg in state.turns() {
                request = request.with_message(msg.role, msg.content.clone());
            }
        }

        request.with_message(MessageRole::User, text)
    }

    /// Runs the full pipeline synchronously.
    ///
    /// Canned responses (empty or non-numeric input) are `Ok` outcomes with
    /// the plan left in `Planned` status; provider failures surface as
    /// [`ProcessingError`] for the transport layer to present.
    pub async fn process(
        &self,
        text: &str,
        session_id: Option<SessionId>,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        let plan = Self::plan(text);

        if let Some(canned) = Self::precheck(text) {
            return Ok(ProcessingOutcome {
                plan,
                response: canned.to_string(),
                session_id,
            });
        }

        info!(session_id = ?session_id, "processing text input");

        let request = self.build_request(text, session_id.as_ref()).await;
        debug!(
            messages = request.messages.len(),
            "sending completion request"
        );

        let completion = self.provider.complete(request).await?;
        let response = Self::finalize_response(&completion.content);

        if let Some(id) = session_id {
            self.finish_exchange(&id, text, &response).await;
        }

        Ok(ProcessingOutcome {
            plan: plan.completed(),
            response,
            session_id,
        })
    }

    /// Starts a streaming turn for the socket transport.
    ///
    /// The caller forwards chunks to its subscribers while accumulating the
    /// full response, then calls [`Self::finish_exchange`].
    pub async fn begin_streaming(
        &self,
        text: &str,
        session_id: SessionId,
    ) -> Result<Turn, ProcessingError> {
        let plan = Self::plan(text);

        if let Some(canned) = Self::precheck(text) {
            return Ok(Turn::Canned(ProcessingOutcome {
                plan,
                response: canned.to_string(),
                session_id: Some(session_id),
            }));
        }

        let request = self.build_request(text, Some(&session_id)).await;
        let stream = self.provider.stream_complete(request).await?;

        Ok(Turn::Streaming {
            plan: plan.completed(),
            stream,
        })
    }

    /// Normalizes provider output, substituting a placeholder when the model
    /// produced only whitespace.
    pub fn finalize_response(raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            "No response generated".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Records a completed exchange in the session store.
    ///
    /// Only called after a successful provider round-trip, so failed calls
    /// never pollute the history.
    pub async fn finish_exchange(&self, session_id: &SessionId, user_text: &str, response: &str) {
        let mut state = self.sessions.get(session_id).await;
        state.record_exchange(CALCULATOR_SYSTEM_PROMPT, user_text, response);
        debug!(
            session_id = %session_id,
            history_len = state.history.len(),
            "updated session state"
        );
        self.sessions.save(session_id, state).await;
    }

    /// Fetches the current state for a session.
    pub async fn session_state(&self, session_id: &SessionId) -> SessionState {
        self.sessions.get(session_id).await
    }

    /// Clears a session. Returns true if it existed.
    pub async fn clear_session(&self, session_id: &SessionId) -> bool {
        self.sessions.delete(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockProvider;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::ports::AiError;
    use futures::StreamExt;

    fn service_with(provider: MockProvider) -> ProcessingService {
        ProcessingService::new(
            Arc::new(provider),
            Arc::new(InMemorySessionStore::new()),
        )
    }

    #[tokio::test]
    async fn empty_input_returns_canned_response() {
        let service = service_with(MockProvider::new());
        let outcome = service.process("", None).await.unwrap();
        assert_eq!(outcome.response, "Please enter a number.");
        assert_eq!(outcome.plan.status, super::super::PlanStatus::Planned);
    }

    #[tokio::test]
    async fn non_numeric_input_returns_canned_response() {
        let service = service_with(MockProvider::new());
        let outcome = service.process("hello", None).await.unwrap();
        assert_eq!(outcome.response, "Please provide a valid number.");
    }

    #[tokio::test]
    async fn whitespace_padded_numbers_are_accepted() {
        let service = service_with(MockProvider::new().with_response("You entered: 42"));
        let outcome = service.process("  42  ", None).await.unwrap();
        assert_eq!(outcome.response, "You entered: 42");
        assert_eq!(outcome.plan.status, super::super::PlanStatus::Completed);
    }

    #[tokio::test]
    async fn session_history_feeds_subsequent_requests() {
        let provider = MockProvider::new()
            .with_response("You entered: 1")
            .with_response("1 + 2 = 3");
        let service = service_with(provider);
        let session = SessionId::new();

        service.process("1", Some(session)).await.unwrap();
        let outcome = service.process("2", Some(session)).await.unwrap();

        assert_eq!(outcome.response, "1 + 2 = 3");
        let state = service.session_state(&session).await;
        assert_eq!(state.last_response, "1 + 2 = 3");
        // system + two exchanges
        assert_eq!(state.history.len(), 5);
    }

    #[tokio::test]
    async fn provider_error_leaves_session_untouched() {
        let provider = MockProvider::new().with_error(AiError::unavailable("offline"));
        let service = service_with(provider);
        let session = SessionId::new();

        let result = service.process("1", Some(session)).await;
        assert!(result.is_err());

        let state = service.session_state(&session).await;
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn empty_completion_yields_placeholder() {
        let service = service_with(MockProvider::new().with_response("   "));
        let outcome = service.process("7", None).await.unwrap();
        assert_eq!(outcome.response, "No response generated");
    }

    #[tokio::test]
    async fn begin_streaming_cans_invalid_input() {
        let service = service_with(MockProvider::new());
        let turn = service
            .begin_streaming("not a number", SessionId::new())
            .await
            .unwrap();
        match turn {
            Turn::Canned(outcome) => {
                assert_eq!(outcome.response, "Please provide a valid number.")
            }
            Turn::Streaming { .. } => panic!("expected canned turn"),
        }
    }

    #[tokio::test]
    async fn streaming_turn_yields_chunks_then_final() {
        let service = service_with(MockProvider::new().with_response("You entered: 9"));
        let turn = service
            .begin_streaming("9", SessionId::new())
            .await
            .unwrap();

        let Turn::Streaming { plan, mut stream } = turn else {
            panic!("expected streaming turn");
        };
        assert_eq!(plan.status, super::super::PlanStatus::Completed);

        let mut full = String::new();
        let mut saw_final = false;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.unwrap();
            full.push_str(&chunk.delta);
            if chunk.is_final() {
                saw_final = true;
            }
        }
        assert!(saw_final);
        assert_eq!(full, "You entered: 9");
    }

    #[tokio::test]
    async fn clear_session_reports_existence() {
        let service = service_with(MockProvider::new().with_response("You entered: 1"));
        let session = SessionId::new();

        assert!(!service.clear_session(&session).await);
        service.process("1", Some(session)).await.unwrap();
        assert!(service.clear_session(&session).await);
    }
}
