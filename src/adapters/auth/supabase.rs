//! Supabase GoTrue adapter for hosted authentication.
//!
//! Implements the `AuthProvider` port against Supabase's auth REST API:
//!
//! - `POST /auth/v1/signup` for registration
//! - `POST /auth/v1/token?grant_type=password` for sign-in
//! - `POST /auth/v1/logout` for sign-out
//! - `GET /auth/v1/user` for token verification
//!
//! Token verification first decodes the JWT locally against the project's
//! JWT secret, so malformed or expired tokens are rejected without a
//! network round-trip, then resolves the user via the API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::foundation::{AuthError, AuthToken, AuthenticatedUser, Timestamp, UserId};
use crate::ports::AuthProvider;

/// Configuration for the Supabase auth adapter.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g., "https://xyzcompany.supabase.co").
    pub url: String,
    /// Anon (publishable) API key, sent as the `apikey` header.
    anon_key: Secret<String>,
    /// JWT secret for local token decoding.
    jwt_secret: Secret<String>,
    /// Expected audience claim in access tokens.
    pub jwt_audience: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl SupabaseConfig {
    /// Creates a new configuration.
    pub fn new(
        url: impl Into<String>,
        anon_key: impl Into<String>,
        jwt_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            anon_key: Secret::new(anon_key.into()),
            jwt_secret: Secret::new(jwt_secret.into()),
            jwt_audience: "authenticated".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the expected JWT audience.
    pub fn with_jwt_audience(mut self, audience: impl Into<String>) -> Self {
        self.jwt_audience = audience.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url.trim_end_matches('/'), path)
    }
}

/// Supabase GoTrue auth provider.
pub struct SupabaseAuthProvider {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseAuthProvider {
    /// Creates a new Supabase auth provider.
    pub fn new(config: SupabaseConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Decodes the access token locally, checking signature, expiry, and
    /// audience. Cheap rejection before any API call.
    fn decode_token(&self, token: &str) -> Result<SupabaseClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.jwt_audience]);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let key = DecodingKey::from_secret(self.config.jwt_secret.expose_secret().as_bytes());

        decode::<SupabaseClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        debug!("access token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        debug!("access token rejected: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })
    }

    async fn post_credentials(
        &self,
        url: String,
        email: &str,
        password: &str,
    ) -> Result<reqwest::Response, AuthError> {
        self.client
            .post(url)
            .header("apikey", self.config.anon_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(format!("auth request failed: {}", e)))
    }

    /// Extracts a human-readable message from a GoTrue error body.
    fn error_message(body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<GoTrueError>(body) {
            if let Some(msg) = parsed.msg.or(parsed.error_description).or(parsed.message) {
                return msg;
            }
        }
        body.to_string()
    }

    fn to_user(payload: SupabaseUser) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(&payload.id).map_err(|_| AuthError::InvalidToken)?;
        let created_at = payload
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| Timestamp::from_datetime(dt.with_timezone(&Utc)));

        Ok(AuthenticatedUser::new(
            id,
            payload.email.unwrap_or_default(),
            created_at,
        ))
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthenticatedUser, AuthToken), AuthError> {
        let response = self
            .post_credentials(self.config.auth_url("signup"), email, password)
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        if !status.is_success() {
            let message = Self::error_message(&body);
            warn!(status = %status, "sign-up rejected");
            return match status.as_u16() {
                400 | 422 => Err(AuthError::RegistrationRejected(message)),
                _ => Err(AuthError::service_unavailable(message)),
            };
        }

        let session: SupabaseSession = serde_json::from_str(&body)
            .map_err(|e| AuthError::service_unavailable(format!("bad auth response: {}", e)))?;

        let user = session
            .user
            .ok_or_else(|| AuthError::service_unavailable("sign-up response missing user"))?;
        let token = session.access_token.ok_or_else(|| {
            AuthError::RegistrationRejected(
                "Registration pending email confirmation".to_string(),
            )
        })?;

        Ok((Self::to_user(user)?, AuthToken::new(token)))
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthenticatedUser, AuthToken), AuthError> {
        let url = format!("{}?grant_type=password", self.config.auth_url("token"));
        let response = self.post_credentials(url, email, password).await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        if !status.is_success() {
            return match status.as_u16() {
                400 | 401 => Err(AuthError::InvalidCredentials),
                _ => Err(AuthError::service_unavailable(Self::error_message(&body))),
            };
        }

        let session: SupabaseSession = serde_json::from_str(&body)
            .map_err(|e| AuthError::service_unavailable(format!("bad auth response: {}", e)))?;

        let user = session
            .user
            .ok_or_else(|| AuthError::service_unavailable("sign-in response missing user"))?;
        let token = session
            .access_token
            .ok_or_else(|| AuthError::service_unavailable("sign-in response missing token"))?;

        Ok((Self::to_user(user)?, AuthToken::new(token)))
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.config.auth_url("logout"))
            .header("apikey", self.config.anon_key.expose_secret())
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(format!("auth request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 => Err(AuthError::InvalidToken),
            _ => Err(AuthError::service_unavailable(format!(
                "logout returned {}",
                status
            ))),
        }
    }

    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.decode_token(token)?;

        let response = self
            .client
            .get(self.config.auth_url("user"))
            .header("apikey", self.config.anon_key.expose_secret())
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(format!("auth request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return match status.as_u16() {
                401 => Err(AuthError::InvalidToken),
                403 | 404 => Err(AuthError::UserNotFound),
                _ => Err(AuthError::service_unavailable(format!(
                    "user lookup returned {}",
                    status
                ))),
            };
        }

        let user: SupabaseUser = response
            .json()
            .await
            .map_err(|e| AuthError::service_unavailable(format!("bad auth response: {}", e)))?;

        Self::to_user(user)
    }
}

impl std::fmt::Debug for SupabaseAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuthProvider")
            .field("url", &self.config.url)
            .finish_non_exhaustive()
    }
}

// ----- GoTrue wire types -----

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SupabaseSession {
    access_token: Option<String>,
    user: Option<SupabaseUser>,
}

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: String,
    email: Option<String>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueError {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SupabaseClaims {
    #[allow(dead_code)]
    sub: String,
    #[allow(dead_code)]
    exp: i64,
}
