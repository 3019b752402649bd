//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// OpenAI model to use
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Gemini model to use
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Primary AI provider
    #[serde(default = "default_provider")]
    pub primary_provider: AiProviderKind,

    /// Fallback AI provider
    pub fallback_provider: Option<AiProviderKind>,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderKind {
    #[default]
    OpenAi,
    Gemini,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if Gemini is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        // At least one provider must have an API key
        if !self.has_openai() && !self.has_gemini() {
            return Err(ValidationError::NoAiProviderConfigured);
        }

        // Primary provider must have an API key
        match self.primary_provider {
            AiProviderKind::OpenAi if !self.has_openai() => {
                return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
            }
            AiProviderKind::Gemini if !self.has_gemini() => {
                return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
            }
            _ => {}
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: default_openai_model(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            primary_provider: default_provider(),
            fallback_provider: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_provider() -> AiProviderKind {
    AiProviderKind::OpenAi
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_max_tokens() -> u32 {
    250
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.primary_provider, AiProviderKind::OpenAi);
        assert_eq!(config.max_tokens, 250);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 90,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(90));
    }

    #[test]
    fn test_has_provider_checks() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            gemini_api_key: None,
            ..Default::default()
        };
        assert!(config.has_openai());
        assert!(!config.has_gemini());
    }

    #[test]
    fn test_validation_no_provider() {
        let config = AiConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_primary_missing_key() {
        let config = AiConfig {
            primary_provider: AiProviderKind::OpenAi,
            gemini_api_key: Some("AIza-xxx".to_string()),
            openai_api_key: None,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_temperature() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            temperature: 3.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_with_fallback() {
        let config = AiConfig {
            primary_provider: AiProviderKind::OpenAi,
            openai_api_key: Some("sk-xxx".to_string()),
            fallback_provider: Some(AiProviderKind::Gemini),
            gemini_api_key: Some("AIza-xxx".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
