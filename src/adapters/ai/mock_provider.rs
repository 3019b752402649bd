//! Mock AI Provider for testing.
//!
//! Configurable to return scripted responses, inject errors, and simulate
//! latency, so tests never call a real AI API. Responses are consumed in
//! the order they were queued; once exhausted a default response is used.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AiError, AiProvider, ChunkStream, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, StreamChunk,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Scripted responses, consumed in order.
    responses: Arc<Mutex<VecDeque<Result<String, AiError>>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Creates a new mock provider.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1").with_streaming(true),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(content.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: AiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<String, AiError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock response".to_string()))
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let content = self.next_response()?;
        Ok(CompletionResponse {
            content,
            model: self.info.model.clone(),
            finish_reason: FinishReason::Stop,
        })
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream, AiError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let content = self.next_response()?;

        // Word-at-a-time chunks whose concatenation reproduces the content
        // exactly.
        let word_chunks: Vec<Result<StreamChunk, AiError>> = content
            .split_inclusive(' ')
            .map(|s| Ok(StreamChunk::content(s)))
            .collect();

        let chunks = stream::iter(word_chunks)
            .chain(stream::once(async {
                Ok(StreamChunk::final_chunk(FinishReason::Stop))
            }));

        Ok(Box::pin(chunks))
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MessageRole;
    use futures::StreamExt;

    fn test_request() -> CompletionRequest {
        CompletionRequest::new().with_message(MessageRole::User, "1")
    }

    #[tokio::test]
    async fn returns_scripted_responses_in_order() {
        let provider = MockProvider::new()
            .with_response("First")
            .with_response("Second");

        let r1 = provider.complete(test_request()).await.unwrap();
        let r2 = provider.complete(test_request()).await.unwrap();
        let r3 = provider.complete(test_request()).await.unwrap();

        assert_eq!(r1.content, "First");
        assert_eq!(r2.content, "Second");
        assert_eq!(r3.content, "Mock response");
    }

    #[tokio::test]
    async fn returns_scripted_errors() {
        let provider = MockProvider::new().with_error(AiError::rate_limited(30));

        let err = provider.complete(test_request()).await.unwrap_err();
        assert!(matches!(err, AiError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockProvider::new().with_response("a");

        assert_eq!(provider.call_count(), 0);
        provider.complete(test_request()).await.unwrap();
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.get_calls()[0].messages[0].content, "1");
    }

    #[tokio::test]
    async fn streaming_chunks_reassemble_exactly() {
        let provider = MockProvider::new().with_response("You entered: 42");

        let mut stream = provider.stream_complete(test_request()).await.unwrap();
        let mut content = String::new();
        let mut final_seen = false;

        while let Some(result) = stream.next().await {
            let chunk = result.unwrap();
            if chunk.is_final() {
                final_seen = true;
            } else {
                content.push_str(&chunk.delta);
            }
        }

        assert_eq!(content, "You entered: 42");
        assert!(final_seen);
    }

    #[tokio::test]
    async fn streaming_error_surfaces_before_stream() {
        let provider = MockProvider::new().with_error(AiError::unavailable("down"));

        let result = provider.stream_complete(test_request()).await;
        assert!(matches!(result, Err(AiError::Unavailable { .. })));
    }
}
