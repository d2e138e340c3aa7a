use super::backend::{CompletionSettings, ProviderKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Where and which model to call for one provider.
///
/// Unset fields fall back to the provider's built-in default, so a config
/// that overrides only `model` keeps the default `base_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoint {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Provider settings shared by every backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Upper bound on a single provider call
    pub timeout_secs: u64,

    /// Sampling temperature (default 0.7)
    pub temperature: f32,

    /// Output token cap (default 2000)
    pub max_tokens: u32,

    pub openai: ProviderEndpoint,
    pub anthropic: ProviderEndpoint,
    pub groq: ProviderEndpoint,
}

impl ProvidersConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn endpoint(&self, kind: ProviderKind) -> &ProviderEndpoint {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Groq => &self.groq,
        }
    }

    /// Model identifier sent to `kind`
    pub fn model(&self, kind: ProviderKind) -> &str {
        self.endpoint(kind)
            .model
            .as_deref()
            .unwrap_or_else(|| kind.default_model())
    }

    /// API root for `kind`
    pub fn base_url(&self, kind: ProviderKind) -> &str {
        self.endpoint(kind)
            .base_url
            .as_deref()
            .unwrap_or_else(|| kind.default_base_url())
    }

    pub fn settings(&self, kind: ProviderKind) -> CompletionSettings {
        CompletionSettings {
            model: self.model(kind).to_string(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            temperature: 0.7,
            max_tokens: 2000,
            openai: ProviderEndpoint::default(),
            anthropic: ProviderEndpoint::default(),
            groq: ProviderEndpoint::default(),
        }
    }
}

/// API keys read from the process environment.
///
/// Never part of the file config, never printed.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub groq: Option<String>,
}

impl ProviderCredentials {
    pub fn from_env() -> Self {
        let read = |kind: ProviderKind| {
            std::env::var(kind.api_key_var())
                .ok()
                .filter(|key| !key.trim().is_empty())
        };

        Self {
            openai: read(ProviderKind::OpenAi),
            anthropic: read(ProviderKind::Anthropic),
            groq: read(ProviderKind::Groq),
        }
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::OpenAi => self.openai.as_deref(),
            ProviderKind::Anthropic => self.anthropic.as_deref(),
            ProviderKind::Groq => self.groq.as_deref(),
        }
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |key: &Option<String>| if key.is_some() { "[set]" } else { "[unset]" };
        f.debug_struct("ProviderCredentials")
            .field("openai", &mask(&self.openai))
            .field("anthropic", &mask(&self.anthropic))
            .field("groq", &mask(&self.groq))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_models() {
        let config = ProvidersConfig::default();
        let settings = config.settings(ProviderKind::Anthropic);

        assert_eq!(settings.model, "claude-3-opus-20240229");
        assert_eq!(settings.max_tokens, 2000);
        assert!((settings.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.settings(ProviderKind::OpenAi).model, "gpt-4");
        assert_eq!(config.settings(ProviderKind::Groq).model, "mixtral-8x7b-32768");
        assert_eq!(config.base_url(ProviderKind::Groq), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_model_override_keeps_default_base_url() {
        let config = ProvidersConfig {
            openai: ProviderEndpoint {
                model: Some("gpt-4o".to_string()),
                base_url: None,
            },
            ..Default::default()
        };

        assert_eq!(config.model(ProviderKind::OpenAi), "gpt-4o");
        assert_eq!(config.base_url(ProviderKind::OpenAi), "https://api.openai.com/v1");
    }

    #[test]
    fn test_credentials_debug_hides_keys() {
        let creds = ProviderCredentials {
            openai: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("[set]"));
    }
}
