use super::{build_pipeline, print_json, read_json, read_thread};
use crate::config::Config;
use crate::contexts::FileContextProvider;
use anyhow::Result;
use casebrief::{CustomerContext, CustomerContextProvider};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct SummarizeArgs {
    #[arg(help = "Thread JSON file (order_id, product, topic, initiated_by, messages)")]
    pub thread: PathBuf,

    #[arg(long, help = "Customer context JSON to attach to this thread")]
    pub context: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "context",
        help = "JSON object of e-mail -> customer context; looked up from the first customer message"
    )]
    pub contexts: Option<PathBuf>,

    #[arg(long, help = "Skip the completion service even if a key is configured")]
    pub rule_based: bool,
}

pub async fn run(args: SummarizeArgs, config: &Config) -> Result<()> {
    let thread = read_thread(&args.thread)?;

    let provider = match &args.contexts {
        Some(path) => {
            let provider = FileContextProvider::load(path)?;
            tracing::debug!(customers = provider.len(), "Loaded customer contexts");
            Some(Arc::new(provider) as Arc<dyn CustomerContextProvider>)
        }
        None => None,
    };

    let pipeline = build_pipeline(config, args.rule_based, provider)?;

    let annotated = match &args.context {
        Some(path) => {
            let context: CustomerContext = read_json(path, "customer context")?;
            pipeline.review_with_context(&thread, Some(context)).await
        }
        None => pipeline.review(&thread).await,
    };

    print_json(&annotated)
}
