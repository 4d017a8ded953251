pub mod assess;
pub mod summarize;

use crate::config::Config;
use anyhow::{Context, Result};
use casebrief::{CustomerContextProvider, PipelineBuilder, ReviewPipeline, ThreadInput};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "casebrief",
    author,
    version,
    about = "Summarize customer-service threads and score how far the summary can be trusted",
    long_about = "Summarize customer-service threads and score how far the summary can be trusted.\n\n\
                  Set OPENROUTER_API_KEY to use the completion service; without it every step \
                  runs on deterministic rules."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Generate and assess a summary for a thread")]
    Summarize(summarize::SummarizeArgs),

    #[command(about = "Assess an existing (possibly edited) summary")]
    Assess(assess::AssessArgs),
}

pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Summarize(args) => summarize::run(args, config).await,
        Commands::Assess(args) => assess::run(args, config).await,
    }
}

pub(crate) fn build_pipeline(
    config: &Config,
    rule_based: bool,
    provider: Option<Arc<dyn CustomerContextProvider>>,
) -> Result<ReviewPipeline> {
    let api_key = if rule_based {
        None
    } else {
        config.openrouter_api_key.clone()
    };

    let mut builder = PipelineBuilder::new()
        .api_key(api_key)
        .generation_config(config.generation_config())
        .assessment_config(config.assessment_config());

    if let Some(base_url) = &config.llm.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(site_url) = &config.site_url {
        builder = builder.referer(site_url.clone());
    }
    if let Some(provider) = provider {
        builder = builder.context_provider(provider);
    }

    builder.build()
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid {} file {}", what, path.display()))
}

pub(crate) fn read_thread(path: &Path) -> Result<ThreadInput> {
    read_json(path, "thread")
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
