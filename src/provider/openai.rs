use super::backend::{CompletionSettings, Provider, ProviderError, ProviderKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice
    pub fn into_text(self) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("no message content in choices".to_string()))
    }
}

/// Chat completions client for OpenAI and OpenAI-compatible APIs (Groq)
pub struct OpenAiCompatibleProvider {
    kind: ProviderKind,
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    settings: CompletionSettings,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        kind: ProviderKind,
        base_url: String,
        api_key: Option<String>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            kind,
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            settings,
        }
    }

    pub(crate) fn request_body<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(self.kind.api_key_var()))?;

        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(provider = %self.kind, model = %self.settings.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::status(status.as_u16(), &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let text = completion.into_text()?;

        tracing::info!(provider = %self.kind, chars = text.len(), "Chat completion received");

        Ok(text)
    }

    fn name(&self) -> &str {
        self.kind.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_key: Option<&str>) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(
            ProviderKind::Groq,
            "https://api.groq.com/openai/v1/".to_string(),
            api_key.map(str::to_string),
            CompletionSettings {
                model: "mixtral-8x7b-32768".to_string(),
                temperature: 0.7,
                max_tokens: 2000,
            },
        )
    }

    #[test]
    fn test_request_body_shape() {
        let provider = provider(Some("key"));
        let body = serde_json::to_value(provider.request_body("hello")).unwrap();

        assert_eq!(body["model"], "mixtral-8x7b-32768");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(provider.base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_response_text_from_first_choice() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"resourceType\":\"Bundle\"}"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_text().unwrap(), "{\"resourceType\":\"Bundle\"}");
    }

    #[test]
    fn test_response_without_choices_is_invalid() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            response.into_text(),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let err = provider(None).complete("hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey("GROQ_API_KEY")));
    }
}
