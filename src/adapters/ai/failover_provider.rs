//! Failover AI Provider - wrapper with automatic failover between providers.
//!
//! When the primary provider fails with a retryable error (rate limit,
//! unavailable, network, timeout), the request is retried once against the
//! fallback provider. Non-retryable errors surface immediately.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::ports::{
    AiError, AiProvider, ChunkStream, CompletionRequest, CompletionResponse, ProviderInfo,
};

/// AI provider wrapper with automatic failover support.
pub struct FailoverProvider {
    primary: Arc<dyn AiProvider>,
    fallback: Option<Arc<dyn AiProvider>>,
}

impl FailoverProvider {
    /// Creates a failover provider with only a primary provider.
    pub fn new(primary: Arc<dyn AiProvider>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Adds a fallback provider.
    pub fn with_fallback(mut self, fallback: Arc<dyn AiProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    fn log_fallback(&self, fallback: &Arc<dyn AiProvider>, err: &AiError) {
        warn!(
            primary = %self.primary.provider_info().name,
            fallback = %fallback.provider_info().name,
            error = %err,
            "primary AI provider failed, using fallback"
        );
    }
}

#[async_trait]
impl AiProvider for FailoverProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        match self.primary.complete(request.clone()).await {
            Ok(response) => Ok(response),
            Err(err) if err.is_retryable() && self.fallback.is_some() => {
                let fallback = self.fallback.as_ref().unwrap();
                self.log_fallback(fallback, &err);
                fallback.complete(request).await
            }
            Err(err) => Err(err),
        }
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream, AiError> {
        match self.primary.stream_complete(request.clone()).await {
            Ok(stream) => Ok(stream),
            Err(err) if err.is_retryable() && self.fallback.is_some() => {
                let fallback = self.fallback.as_ref().unwrap();
                self.log_fallback(fallback, &err);
                fallback.stream_complete(request).await
            }
            Err(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockProvider;
    use crate::ports::MessageRole;

    fn make_request() -> CompletionRequest {
        CompletionRequest::new().with_message(MessageRole::User, "1")
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let primary = MockProvider::new().with_response("primary");
        let fallback = MockProvider::new().with_response("fallback");
        let fallback_calls = fallback.clone();

        let provider =
            FailoverProvider::new(Arc::new(primary)).with_fallback(Arc::new(fallback));

        let response = provider.complete(make_request()).await.unwrap();
        assert_eq!(response.content, "primary");
        assert_eq!(fallback_calls.call_count(), 0);
    }

    #[tokio::test]
    async fn retryable_error_uses_fallback() {
        let primary = MockProvider::new().with_error(AiError::rate_limited(30));
        let fallback = MockProvider::new().with_response("fallback");

        let provider =
            FailoverProvider::new(Arc::new(primary)).with_fallback(Arc::new(fallback));

        let response = provider.complete(make_request()).await.unwrap();
        assert_eq!(response.content, "fallback");
    }

    #[tokio::test]
    async fn non_retryable_error_surfaces_immediately() {
        let primary = MockProvider::new().with_error(AiError::AuthenticationFailed);
        let fallback = MockProvider::new().with_response("fallback");
        let fallback_calls = fallback.clone();

        let provider =
            FailoverProvider::new(Arc::new(primary)).with_fallback(Arc::new(fallback));

        let result = provider.complete(make_request()).await;
        assert!(matches!(result, Err(AiError::AuthenticationFailed)));
        assert_eq!(fallback_calls.call_count(), 0);
    }

    #[tokio::test]
    async fn no_fallback_configured_returns_error() {
        let primary = MockProvider::new().with_error(AiError::rate_limited(30));
        let provider = FailoverProvider::new(Arc::new(primary));

        assert!(provider.complete(make_request()).await.is_err());
    }

    #[tokio::test]
    async fn fallback_failure_returns_fallback_error() {
        let primary = MockProvider::new().with_error(AiError::unavailable("down"));
        let fallback = MockProvider::new().with_error(AiError::AuthenticationFailed);

        let provider =
            FailoverProvider::new(Arc::new(primary)).with_fallback(Arc::new(fallback));

        let result = provider.complete(make_request()).await;
        assert!(matches!(result, Err(AiError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn streaming_fails_over_too() {
        let primary = MockProvider::new().with_error(AiError::unavailable("down"));
        let fallback = MockProvider::new().with_response("fallback stream");

        let provider =
            FailoverProvider::new(Arc::new(primary)).with_fallback(Arc::new(fallback));

        assert!(provider.stream_complete(make_request()).await.is_ok());
    }
}
