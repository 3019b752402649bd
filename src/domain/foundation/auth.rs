//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user as seen by the application.
//! They have no external dependencies - any hosted auth backend (Supabase,
//! Auth0, Keycloak) can populate them via the `AuthProvider` port.

use serde::Serialize;
use thiserror::Error;

use super::{Timestamp, UserId};

/// Authenticated user extracted from a validated access token.
///
/// This is a domain type with no provider dependencies.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// When the account was created, if the provider reports it.
    pub created_at: Option<Timestamp>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// Typically called by an `AuthProvider` adapter after validating a token.
    pub fn new(id: UserId, email: impl Into<String>, created_at: Option<Timestamp>) -> Self {
        Self {
            id,
            email: email.into(),
            created_at,
        }
    }
}

/// Opaque access token issued by the auth provider on sign-up or sign-in.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for transport back to the client.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Authentication errors, described from the application's perspective
/// rather than the provider's.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists in the system.
    #[error("User not found")]
    UserNotFound,

    /// The provider rejected the supplied email/password pair.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Sign-up was rejected (e.g. email already registered, weak password).
    #[error("Registration rejected: {0}")]
    RegistrationRejected(String),

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn authenticated_user_new_creates_user() {
        let user = AuthenticatedUser::new(test_user_id(), "test@example.com", None);
        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email, "test@example.com");
        assert!(user.created_at.is_none());
    }

    #[test]
    fn auth_token_serializes_transparently() {
        let token = AuthToken::new("abc.def.ghi");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc.def.ghi\"");
    }

    #[test]
    fn reauthentication_classification() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::UserNotFound.requires_reauthentication());
        assert!(!AuthError::InvalidCredentials.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }

    #[test]
    fn transient_classification() {
        assert!(AuthError::service_unavailable("down").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
    }
}
