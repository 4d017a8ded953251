// Configuration layer for provider-agnostic client creation

use crate::error::Result;
use crate::openrouter::{OpenRouterClient, OPENROUTER_API_BASE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Connection details for an OpenAI-compatible completion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    /// Base URL (optional, defaults to https://openrouter.ai/api/v1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Site URL reported as `HTTP-Referer`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    /// Application name reported as `X-Title`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ProviderConfig {
    /// OpenRouter provider config
    pub fn openrouter(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            referer: None,
            title: None,
        }
    }

    /// Build from an optional credential; `None` or a blank key means no service is configured
    pub fn from_api_key(api_key: Option<String>) -> Option<Self> {
        api_key
            .filter(|key| !key.trim().is_empty())
            .map(Self::openrouter)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENROUTER_API_BASE)
    }
}

/// Factory for creating chat clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    /// Create a chat client from provider configuration
    pub fn create_chat_client(config: ProviderConfig) -> Result<Arc<dyn crate::traits::ChatClient>> {
        let mut builder = OpenRouterClient::builder()
            .api_key(config.api_key)
            .base_url(config.base_url.unwrap_or_else(|| OPENROUTER_API_BASE.to_string()));

        if let Some(referer) = config.referer {
            builder = builder.referer(referer);
        }
        if let Some(title) = config.title {
            builder = builder.title(title);
        }

        Ok(Arc::new(builder.build()?))
    }
}
