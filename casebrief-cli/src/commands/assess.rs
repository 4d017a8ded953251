use super::{build_pipeline, print_json, read_json, read_thread};
use crate::config::Config;
use anyhow::{Context, Result};
use casebrief::CandidateSummary;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args)]
pub struct AssessArgs {
    #[arg(help = "Thread JSON file the summary was written for")]
    pub thread: PathBuf,

    #[arg(help = "Summary JSON (a summary object, or the output of `casebrief summarize`)")]
    pub summary: PathBuf,

    #[arg(long, help = "Skip the completion service even if a key is configured")]
    pub rule_based: bool,
}

pub async fn run(args: AssessArgs, config: &Config) -> Result<()> {
    let thread = read_thread(&args.thread)?;
    let raw: Value = read_json(&args.summary, "summary")?;
    let candidate = candidate_from(raw)?;

    let pipeline = build_pipeline(config, args.rule_based, None)?;
    let assessment = pipeline.assess_summary_confidence(&thread, &candidate).await;

    print_json(&assessment)
}

/// Accepts a bare summary or an annotated result wrapping one under `summary`
fn candidate_from(raw: Value) -> Result<CandidateSummary> {
    let inner = match raw.get("summary") {
        Some(nested @ Value::Object(_)) => nested.clone(),
        _ => raw,
    };
    serde_json::from_value(inner).context("summary does not match the expected shape")
}
