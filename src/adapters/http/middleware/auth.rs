//! Authentication middleware and extractors for axum.
//!
//! The middleware validates Bearer tokens through the `AuthProvider` port
//! and injects the resulting `AuthenticatedUser` into request extensions.
//! Handlers opt in to enforcement with the `RequireAuth` extractor; routes
//! without it remain public even behind the middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::AuthProvider;

/// Auth middleware state - the auth provider port.
pub type AuthState = Arc<dyn AuthProvider>;

/// Validates Bearer tokens and injects the authenticated user.
///
/// Requests without an Authorization header pass through unauthenticated;
/// requests with an invalid token are rejected with 401.
pub async fn auth_middleware(
    State(provider): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned);

    match token {
        Some(token) => match provider.verify(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                request.extensions_mut().insert(BearerToken(token));
                next.run(request).await
            }
            Err(e) => {
                let (status, message) = match &e {
                    AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                    AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                    AuthError::ServiceUnavailable(msg) => {
                        tracing::error!("Auth service unavailable: {}", msg);
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "Authentication service unavailable",
                        )
                    }
                    _ => (StatusCode::UNAUTHORIZED, "Authentication failed"),
                };

                (
                    status,
                    Json(serde_json::json!({
                        "error": message,
                        "code": "AUTH_ERROR"
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// The raw Bearer token of the current request.
///
/// Injected by the middleware alongside the user, for handlers that need to
/// forward the token (sign-out).
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> axum::extract::FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<BearerToken>()
                .cloned()
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor that requires an authenticated user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => (StatusCode::UNAUTHORIZED, "Authentication required"),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockAuthProvider;
    use crate::domain::foundation::UserId;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user-123").unwrap(), "test@example.com", None)
    }

    #[tokio::test]
    async fn provider_returns_user_for_valid_token() {
        let provider: Arc<dyn AuthProvider> =
            Arc::new(MockAuthProvider::new().with_user("valid-token", test_user()));

        let result = provider.verify("valid-token").await;
        assert_eq!(result.unwrap().email, "test@example.com");
    }

    #[tokio::test]
    async fn provider_rejects_unknown_token() {
        let provider: Arc<dyn AuthProvider> = Arc::new(MockAuthProvider::new());
        assert!(matches!(
            provider.verify("unknown").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());

        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        let RequireAuth(user) = result.unwrap();
        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn bearer_token_extractor_reads_injected_token() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request
            .extensions_mut()
            .insert(BearerToken("tok-123".to_string()));

        let (mut parts, _body) = request.into_parts();

        let BearerToken(token) = BearerToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(token, "tok-123");
    }

    #[test]
    fn auth_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
