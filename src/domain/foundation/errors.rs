//! Shared validation errors for foundation value objects.

use thiserror::Error;

/// Errors constructing foundation value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// User id must be a non-empty string.
    #[error("User id cannot be empty")]
    EmptyUserId,
}
