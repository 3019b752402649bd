//! AI Provider Adapters.
//!
//! Implementations of the AiProvider port:
//!
//! - `MockProvider` - Configurable mock for testing
//! - `OpenAiProvider` - OpenAI chat models with SSE streaming
//! - `GeminiProvider` - Google Gemini models
//! - `FailoverProvider` - Wrapper with automatic failover between providers

mod failover_provider;
mod gemini_provider;
mod mock_provider;
mod openai_provider;

pub use failover_provider::FailoverProvider;
pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::MockProvider;
pub use openai_provider::{OpenAiConfig, OpenAiProvider};
