use super::anthropic::AnthropicProvider;
use super::backend::{Provider, ProviderKind};
use super::config::{ProviderCredentials, ProvidersConfig};
use super::openai::OpenAiCompatibleProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Provider lookup table, keyed by the name clients send as `model`
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the built-in providers
    pub fn from_config(config: &ProvidersConfig, credentials: &ProviderCredentials) -> Self {
        let mut registry = Self::new();

        for kind in ProviderKind::ALL {
            let base_url = config.base_url(kind).to_string();
            let api_key = credentials.get(kind).map(str::to_string);
            if api_key.is_none() {
                warn!("{} is not set; {} requests will fail", kind.api_key_var(), kind);
            }

            let provider: Arc<dyn Provider> = match kind {
                ProviderKind::OpenAi | ProviderKind::Groq => Arc::new(OpenAiCompatibleProvider::new(
                    kind,
                    base_url,
                    api_key,
                    config.settings(kind),
                )),
                ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(
                    base_url,
                    api_key,
                    config.settings(kind),
                )),
            };

            info!("Registered provider {} (model {})", kind, config.model(kind));
            registry.register(kind.key(), provider);
        }

        registry
    }

    /// Add or replace a provider under `key`
    pub fn register(&mut self, key: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(key.into(), provider);
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, key: impl Into<String>, provider: Arc<dyn Provider>) -> Self {
        self.register(key, provider);
        self
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(key).cloned()
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_registers_builtin_providers() {
        let registry =
            ProviderRegistry::from_config(&ProvidersConfig::default(), &ProviderCredentials::default());

        assert_eq!(registry.keys(), vec!["anthropic", "groq", "openai"]);
        assert_eq!(registry.get("groq").map(|p| p.name().to_string()), Some("groq".to_string()));
        assert!(registry.get("foo").is_none());
    }
}
