use crate::pipeline::ReviewPipeline;
use crate::provider::CustomerContextProvider;
use anyhow::{Context, Result};
use casebrief_llm::{ChatClient, ClientFactory, ProviderConfig};
use casebrief_summarize::{ConfidenceAssessor, Summarizer};
use casebrief_types::{AssessmentConfig, GenerationConfig};
use std::sync::Arc;

/// Reported as `HTTP-Referer` when no site URL is configured
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";

/// Builder for constructing a [`ReviewPipeline`] with optional components
///
/// Leaving out the API key is valid: the pipeline then runs on rules only.
#[derive(Default)]
pub struct PipelineBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    referer: Option<String>,
    client: Option<Arc<dyn ChatClient>>,
    generation: GenerationConfig,
    assessment: AssessmentConfig,
    context_provider: Option<Arc<dyn CustomerContextProvider>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion-service credential; `None` or blank selects the rule-based strategies
    pub fn api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Site URL sent as `HTTP-Referer`
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Use an existing client instead of building one from the API key
    pub fn chat_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation = config;
        self
    }

    pub fn assessment_config(mut self, config: AssessmentConfig) -> Self {
        self.assessment = config;
        self
    }

    pub fn context_provider(mut self, provider: Arc<dyn CustomerContextProvider>) -> Self {
        self.context_provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<ReviewPipeline> {
        let client = match self.client {
            Some(client) => Some(client),
            None => self.provider_config().map(create_client).transpose()?,
        };

        if client.is_none() {
            tracing::info!("No completion service configured, pipeline will use rule-based strategies");
        }

        Ok(ReviewPipeline::new(
            Summarizer::new(client.clone(), self.generation),
            ConfidenceAssessor::new(client, self.assessment),
            self.context_provider,
        ))
    }

    fn provider_config(&self) -> Option<ProviderConfig> {
        let mut config = ProviderConfig::from_api_key(self.api_key.clone())?;
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        let referer = self.referer.as_deref().unwrap_or(DEFAULT_SITE_URL);
        Some(
            config
                .with_referer(referer)
                .with_title(self.generation.title.clone()),
        )
    }
}

fn create_client(config: ProviderConfig) -> Result<Arc<dyn ChatClient>> {
    ClientFactory::create_chat_client(config).context("failed to create completion client")
}
