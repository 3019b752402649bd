//! HTTP server configuration: bind address, environment, logging, CORS.

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Server section of the application configuration.
///
/// Every field has a development-friendly default, so the section can be
/// omitted entirely; `validate()` checks the combination makes sense.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Deployment environment. Controls validation strictness elsewhere
    /// (production requires HTTPS for the auth backend).
    pub environment: Environment,

    /// Default tracing filter, overridable via `RUST_LOG`.
    pub log_level: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Comma-separated CORS origins. Unset means permissive, for local
    /// frontend development.
    pub cors_origins: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,quillboard=debug,sqlx=warn".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// The address to bind the listener to. Valid after `validate()`.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("validated bind address")
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Splits the configured CORS origins, trimming whitespace around each.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .map(|raw| raw.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 || format!("{}:{}", self.host, self.port).parse::<SocketAddr>().is_err()
        {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}
