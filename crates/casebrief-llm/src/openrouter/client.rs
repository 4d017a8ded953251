// OpenRouter / OpenAI-compatible chat completions client

use crate::error::{LlmError, Result};
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
use crate::types::Message;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

pub const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";

/// Chat completions client (HTTP direct, no SDK)
///
/// Speaks the `/chat/completions` wire format shared by OpenRouter and OpenAI:
/// - Auth header: `Authorization: Bearer {key}`
/// - Request body: `{model, messages: [{role, content}], temperature, max_tokens}`
/// - Response body: `{choices: [{message: {content}}]}`
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenRouterClient {
    /// Create new client with API key against the default OpenRouter endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> OpenRouterClientBuilder {
        OpenRouterClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build chat completion request payload
    fn build_chat_request(&self, model: &str, messages: &[Message], options: &ChatOptions) -> Value {
        let wire_messages: Vec<Value> = messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role(),
                    "content": msg.content(),
                })
            })
            .collect();

        let mut request = serde_json::json!({
            "model": model,
            "messages": wire_messages,
        });

        if let Some(obj) = request.as_object_mut() {
            if let Some(temp) = options.temperature {
                obj.insert("temperature".to_string(), serde_json::json!(temp));
            }
            if let Some(max_tokens) = options.max_tokens {
                obj.insert("max_tokens".to_string(), serde_json::json!(max_tokens));
            }
        }

        request
    }
}

#[async_trait]
impl ChatClient for OpenRouterClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = self.build_chat_request(&request.model, &request.messages, &request.options);

        let mut builder = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload);

        if let Some(timeout) = request.options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(title) = &request.options.title {
            builder = builder.header("X-Title", title.as_str());
        }

        tracing::debug!(model = %request.model, url = %self.base_url, "Sending chat completion request");

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Http { status, body });
        }

        let raw: CompletionResponse = response.json().await?;

        let choice = raw.choices.into_iter().next();
        let finish_reason = choice.as_ref().and_then(|c| c.finish_reason.clone());
        let content = choice
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::MissingContent)?;

        Ok(ChatResponse {
            content,
            usage: raw.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason,
            model: raw.model,
        })
    }
}

/// Builder for [`OpenRouterClient`]
#[derive(Debug, Default)]
pub struct OpenRouterClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    referer: Option<String>,
    title: Option<String>,
}

impl OpenRouterClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Base URL, e.g. "https://openrouter.ai/api/v1" (no trailing `/chat/completions`)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sent as `HTTP-Referer` on every request
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Default `X-Title`; a per-request title in [`ChatOptions`] replaces it
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn build(self) -> Result<OpenRouterClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::InvalidConfig("API key is required".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", api_key), "API key")?);
        if let Some(referer) = &self.referer {
            headers.insert("HTTP-Referer", header_value(referer, "referer")?);
        }
        if let Some(title) = &self.title {
            headers.insert("X-Title", header_value(title, "title")?);
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LlmError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| OPENROUTER_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(OpenRouterClient { http_client, base_url })
    }
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| LlmError::InvalidConfig(format!("Invalid {} format", what)))
}

// ============================================================================
// WIRE RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
