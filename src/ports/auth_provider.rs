//! Auth Provider Port - interface to the hosted authentication backend.
//!
//! Sign-up, sign-in, and token verification are delegated to a hosted
//! service (Supabase GoTrue in production). The middleware and the auth
//! HTTP handlers only ever see this trait.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthToken, AuthenticatedUser};

/// Port for hosted authentication operations.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new user, returning the created user and an access token.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthenticatedUser, AuthToken), AuthError>;

    /// Authenticate with email and password.
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthenticatedUser, AuthToken), AuthError>;

    /// Invalidate an access token server-side.
    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;

    /// Validate an access token and resolve the user behind it.
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
