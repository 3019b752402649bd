//! HTTP handlers for the authentication endpoints.
//!
//! These are thin shells over the `AuthProvider` port. All credential
//! checking happens at the hosted backend; the handlers translate its
//! outcomes into HTTP status codes.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::{BearerToken, RequireAuth};
use crate::domain::foundation::AuthError;
use crate::ports::AuthProvider;

use super::dto::{AuthResponse, CredentialsRequest, ErrorResponse, LogoutResponse, UserResponse};

#[derive(Clone)]
pub struct AuthHandlers {
    provider: Arc<dyn AuthProvider>,
}

impl AuthHandlers {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }
}

/// POST /auth/register - Create a new account
pub async fn register(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    match handlers.provider.sign_up(&req.email, &req.password).await {
        Ok((user, token)) => {
            let response = AuthResponse {
                user: user.into(),
                access_token: token.as_str().to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_auth_error(e),
    }
}

/// POST /auth/login - Authenticate with email and password
pub async fn login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    match handlers.provider.sign_in(&req.email, &req.password).await {
        Ok((user, token)) => {
            let response = AuthResponse {
                user: user.into(),
                access_token: token.as_str().to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_auth_error(e),
    }
}

/// POST /auth/logout - Invalidate the current access token
pub async fn logout(
    State(handlers): State<AuthHandlers>,
    BearerToken(token): BearerToken,
) -> Response {
    match handlers.provider.sign_out(&token).await {
        Ok(()) => {
            let response = LogoutResponse {
                message: "Signed out".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_auth_error(e),
    }
}

/// GET /auth/profile - The user behind the supplied token
pub async fn profile(RequireAuth(user): RequireAuth) -> Response {
    let response: UserResponse = user.into();
    (StatusCode::OK, Json(response)).into_response()
}

fn handle_auth_error(error: AuthError) -> Response {
    let (status, code) = match &error {
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        AuthError::RegistrationRejected(_) => (StatusCode::BAD_REQUEST, "REGISTRATION_REJECTED"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
        AuthError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("auth service unavailable: {}", msg);
            (StatusCode::SERVICE_UNAVAILABLE, "AUTH_UNAVAILABLE")
        }
    };

    (
        status,
        Json(ErrorResponse::new(code, error.to_string())),
    )
        .into_response()
}
