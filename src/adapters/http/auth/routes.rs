//! HTTP routes for the authentication endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{login, logout, profile, register, AuthHandlers};

/// Creates the auth router.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        .with_state(handlers)
}
