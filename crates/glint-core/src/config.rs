//! Provider configuration
//!
//! Credentials are resolved once at job start and treated as immutable for
//! the duration of a run. Environment variables:
//!
//! - `GEMINI_API_KEY`: Gemini access key (primary provider)
//! - `GEMINI_MODEL`: Gemini model override (default: models/text-bison-001)
//! - `OPENAI_API_KEY`: OpenAI access key (secondary provider)
//!
//! When the Gemini key is set it is used exclusively, regardless of the
//! OpenAI key. When neither key is set the job is a no-op.

/// Default Gemini text model when `GEMINI_MODEL` is not set
pub const DEFAULT_GEMINI_MODEL: &str = "models/text-bison-001";

/// Resolved provider credentials
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Gemini access key (primary provider)
    pub gemini_key: Option<String>,
    /// Gemini model identifier
    pub gemini_model: Option<String>,
    /// OpenAI access key (secondary provider)
    pub openai_key: Option<String>,
}

impl ProviderConfig {
    /// Read provider configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            gemini_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL").ok().filter(|m| !m.is_empty()),
            openai_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }

    /// Gemini model with the default applied
    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    /// Whether at least one provider credential is configured
    pub fn any_configured(&self) -> bool {
        self.gemini_key.is_some() || self.openai_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_unconfigured() {
        let config = ProviderConfig::default();
        assert!(!config.any_configured());
        assert_eq!(config.gemini_model(), "models/text-bison-001");
    }

    #[test]
    fn test_model_override() {
        let config = ProviderConfig {
            gemini_model: Some("models/custom".to_string()),
            ..Default::default()
        };
        assert_eq!(config.gemini_model(), "models/custom");
    }

    #[test]
    fn test_either_key_configures() {
        let gemini_only = ProviderConfig {
            gemini_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(gemini_only.any_configured());

        let openai_only = ProviderConfig {
            openai_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(openai_only.any_configured());
    }
}
