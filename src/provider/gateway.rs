use super::backend::ProviderError;
use super::prompt::build_fhir_prompt;
use super::registry::ProviderRegistry;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unsupported model type: {0}")]
    UnsupportedProvider(String),
    #[error("AI processing error with {provider}: {message}")]
    Provider { provider: String, message: String },
}

/// Routes transcriptions to a provider selected by key.
///
/// Stateless apart from the read-only registry; safe to share across requests.
#[derive(Clone)]
pub struct DispatchGateway {
    registry: ProviderRegistry,
    timeout: Duration,
}

impl DispatchGateway {
    pub fn new(registry: ProviderRegistry, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Send `transcription` to the provider named `provider_key` and return its raw text.
    ///
    /// Failures are not retried.
    pub async fn dispatch(
        &self,
        transcription: &str,
        provider_key: &str,
    ) -> Result<String, DispatchError> {
        let provider = self
            .registry
            .get(provider_key)
            .ok_or_else(|| DispatchError::UnsupportedProvider(provider_key.to_string()))?;

        let prompt = build_fhir_prompt(transcription);

        let result = match tokio::time::timeout(self.timeout, provider.complete(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout.as_secs())),
        };

        match result {
            Ok(text) => {
                info!(provider = provider.name(), chars = text.len(), "Dispatch completed");
                Ok(text)
            }
            Err(e) => {
                let message = e.summary();
                error!("AI processing error with {}: {}", provider.name(), message);
                debug!(provider = provider.name(), "Provider error detail: {}", e);
                Err(DispatchError::Provider {
                    provider: provider.name().to_string(),
                    message,
                })
            }
        }
    }
}
