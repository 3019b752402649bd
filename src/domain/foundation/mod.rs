//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers, timestamps, and auth vocabulary used across
//! the processing and board modules.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthToken, AuthenticatedUser};
pub use errors::ValidationError;
pub use ids::{MessageId, SessionId, UserId};
pub use timestamp::Timestamp;
