use std::fmt;

/// Longest provider error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Built-in provider backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Groq,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::OpenAi, Self::Anthropic, Self::Groq];

    /// Key clients use to select this provider
    pub fn key(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Groq => "groq",
        }
    }

    /// Environment variable holding the API credential
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Groq => "GROQ_API_KEY",
        }
    }

    /// Model used unless the config names another
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4",
            Self::Anthropic => "claude-3-opus-20240229",
            Self::Groq => "mixtral-8x7b-32768",
        }
    }

    /// API root used unless the config names another
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
            Self::Groq => "https://api.groq.com/openai/v1",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sampling parameters sent with every completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("missing API key ({0} is not set)")]
    MissingApiKey(&'static str),
    #[error("request failed: {0}")]
    Request(String),
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("timed out after {0}s")]
    Timeout(u64),
}

impl ProviderError {
    /// Non-success HTTP status, keeping only the head of the body
    pub fn status(status: u16, body: &str) -> Self {
        let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        Self::Status { status, body }
    }

    /// Error kind and status only; never includes response bodies or
    /// transport messages.
    pub fn summary(&self) -> String {
        match self {
            Self::MissingApiKey(var) => format!("missing API key ({} is not set)", var),
            Self::Request(_) => "request failed".to_string(),
            Self::Status { status, .. } => format!("status {}", status),
            Self::InvalidResponse(_) => "invalid response".to_string(),
            Self::Timeout(secs) => format!("timed out after {}s", secs),
        }
    }
}

/// Chat completion backend
///
/// Implementations:
/// - OpenAI-compatible chat completions (OpenAI, Groq)
/// - Anthropic messages API
/// - Stubs in tests
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Send a single user prompt and return the raw text reply
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
