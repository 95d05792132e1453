//! OpenAI-compatible provider implementation.
//!
//! Works with OpenAI and any endpoint exposing an OpenAI-compatible
//! `/chat/completions` route. Single request, single response — no
//! streaming, no retry.

use async_trait::async_trait;
use redpen_config::AppConfig;
use redpen_core::error::ProviderError;
use redpen_core::provider::{
    ChatMessage, ChatRole, Provider, ProviderRequest, ProviderResponse, Usage,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// An OpenAI-compatible LLM provider.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Build a provider from app configuration, honoring the proxy setting.
    ///
    /// The caller is expected to have checked `require_api_key` already; a
    /// missing key here just produces unauthenticated requests.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder().timeout(std::time::Duration::from_secs(120));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| ProviderError::Network(format!("Invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
            info!(proxy = %proxy_url, "Using proxy for provider calls");
        }

        let client = builder
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            name: "openai".into(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
            client,
        })
    }

    /// Convert our ChatMessage types to the OpenAI API format.
    fn to_api_messages(messages: &[ChatMessage]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    ChatRole::System => "system".into(),
                    ChatRole::User => "user".into(),
                    ChatRole::Assistant => "assistant".into(),
                },
                content: Some(m.content.clone()),
            })
            .collect()
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_api_messages(&request.messages),
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "stream": false,
        });

        debug!(
            provider = %self.name,
            model = %request.model,
            messages = request.messages.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(format!(
                "provider rejected the key (status {status})"
            )));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        debug!(chars = content.chars().count(), "Response received");

        let usage = api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ProviderResponse {
            content,
            model: api_response.model,
            usage,
        })
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_trailing_slash() {
        let provider = OpenAiCompatProvider::new("openai", "https://api.openai.com/v1/", "sk-test");
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn from_config_uses_base_url_and_key() {
        let config = AppConfig {
            api_key: Some("sk-test".into()),
            ..AppConfig::default()
        };
        let provider = OpenAiCompatProvider::from_config(&config).unwrap();
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
        assert_eq!(provider.api_key, "sk-test");
    }

    #[test]
    fn invalid_proxy_url_rejected() {
        let config = AppConfig {
            proxy_url: Some("\0not a url".into()),
            ..AppConfig::default()
        };
        assert!(OpenAiCompatProvider::from_config(&config).is_err());
    }

    #[test]
    fn message_conversion() {
        let messages = vec![
            ChatMessage::system("Ты полезный ассистент."),
            ChatMessage::system("Контекст документа:\n\nтекст"),
            ChatMessage::user("Сократи текст"),
        ];
        let api_messages = OpenAiCompatProvider::to_api_messages(&messages);
        assert_eq!(api_messages.len(), 3);
        assert_eq!(api_messages[0].role, "system");
        assert_eq!(api_messages[1].role, "system");
        assert_eq!(api_messages[2].role, "user");
        assert_eq!(api_messages[2].content.as_deref(), Some("Сократи текст"));
    }

    #[test]
    fn parse_completion_response() {
        let data = r#"{
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "Краткий текст."}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 18, "total_tokens": 138}
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.model, "gpt-4o-mini");
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Краткий текст.")
        );
        assert_eq!(parsed.usage.as_ref().unwrap().total_tokens, 138);
    }

    #[test]
    fn parse_response_without_content() {
        let data = r#"{"model": "gpt-4o-mini", "choices": [{"message": {"role": "assistant"}}]}"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn parse_response_without_choices() {
        let parsed: ApiResponse = serde_json::from_str(r#"{"model": "m"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
