//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (Supabase GoTrue)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Supabase project URL
    pub supabase_url: String,

    /// Supabase anon (publishable) API key
    pub supabase_anon_key: String,

    /// JWT secret used to sanity-check access tokens locally
    pub jwt_secret: String,

    /// Expected JWT audience claim
    #[serde(default = "default_audience")]
    pub jwt_audience: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the Supabase URL.
    /// In development, allows localhost with HTTP.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.supabase_url.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_URL"));
        }
        if self.supabase_anon_key.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_ANON_KEY"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }

        if *environment == Environment::Production && !self.supabase_url.starts_with("https://") {
            return Err(ValidationError::SupabaseMustBeHttps);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            jwt_secret: String::new(),
            jwt_audience: default_audience(),
        }
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
