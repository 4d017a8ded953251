use casebrief::{AssessmentConfig, GenerationConfig};
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub assessment: AssessmentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(skip)]
    pub openrouter_api_key: Option<String>,
    #[serde(skip)]
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmConfig {
    /// Applied to both passes when set
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables, e.g. `CASEBRIEF_GENERATION__MAX_RETRIES=5`
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("CASEBRIEF")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        // Absence is not an error: no key selects the rule-based strategies
        cfg.openrouter_api_key = std::env::var("OPENROUTER_API_KEY").ok();
        cfg.site_url = std::env::var("CASEBRIEF_SITE_URL").ok();

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    pub fn generation_config(&self) -> GenerationConfig {
        match &self.llm.model {
            Some(model) => self.generation.clone().with_model(model.clone()),
            None => self.generation.clone(),
        }
    }

    pub fn assessment_config(&self) -> AssessmentConfig {
        match &self.llm.model {
            Some(model) => self.assessment.clone().with_model(model.clone()),
            None => self.assessment.clone(),
        }
    }
}
