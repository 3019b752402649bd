//! Ports - trait interfaces at the application's seams.
//!
//! Adapters implement these; the domain and application layers depend only
//! on the traits.

mod ai_provider;
mod auth_provider;
mod message_repository;
mod session_store;

pub use ai_provider::{
    AiError, AiProvider, ChunkStream, CompletionRequest, CompletionResponse, FinishReason,
    Message, MessageRole, ProviderInfo, StreamChunk,
};
pub use auth_provider::AuthProvider;
pub use message_repository::MessageRepository;
pub use session_store::SessionStore;
