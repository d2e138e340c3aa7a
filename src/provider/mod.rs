//! AI dispatch gateway
//!
//! Wraps a transcription in the fixed FHIR instruction prompt and forwards it
//! to one of the configured LLM providers:
//! - `openai` - OpenAI chat completions
//! - `anthropic` - Anthropic messages API
//! - `groq` - Groq (OpenAI-compatible chat completions)

mod anthropic;
mod backend;
mod config;
mod gateway;
mod openai;
pub mod prompt;
mod registry;

pub use anthropic::AnthropicProvider;
pub use backend::{CompletionSettings, Provider, ProviderError, ProviderKind};
pub use config::{ProviderCredentials, ProviderEndpoint, ProvidersConfig};
pub use gateway::{DispatchError, DispatchGateway};
pub use openai::OpenAiCompatibleProvider;
pub use prompt::build_fhir_prompt;
pub use registry::ProviderRegistry;
