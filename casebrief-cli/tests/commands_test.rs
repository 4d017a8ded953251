use casebrief::{CandidateSummary, CurrentStatus, CustomerContextProvider, ReviewPipeline, ThreadInput};
use casebrief_cli::commands::{assess, summarize};
use casebrief_cli::config::Config;
use casebrief_cli::contexts::FileContextProvider;
use std::path::PathBuf;
use std::sync::Arc;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn config() -> Config {
    toml::from_str("").unwrap()
}

#[tokio::test]
async fn test_sample_thread_reviewed_with_file_contexts() {
    let raw = std::fs::read_to_string(data("thread.json")).unwrap();
    let thread: ThreadInput = serde_json::from_str(&raw).unwrap();
    let provider: Arc<dyn CustomerContextProvider> =
        Arc::new(FileContextProvider::load(data("contexts.json")).unwrap());

    let pipeline = casebrief::PipelineBuilder::new()
        .context_provider(provider)
        .build()
        .unwrap();
    let annotated = pipeline.review(&thread).await;

    assert!(annotated.context_attached);
    assert_eq!(annotated.summary.current_status, CurrentStatus::Pending);
    assert_eq!(annotated.summary.key_issue, "Defective product");
}

#[tokio::test]
async fn test_summarize_command_runs_offline() {
    let args = summarize::SummarizeArgs {
        thread: data("thread.json"),
        context: None,
        contexts: Some(data("contexts.json")),
        rule_based: true,
    };
    summarize::run(args, &config()).await.unwrap();
}

#[tokio::test]
async fn test_summarize_command_reports_missing_file() {
    let args = summarize::SummarizeArgs {
        thread: data("missing.json"),
        context: None,
        contexts: None,
        rule_based: true,
    };
    let err = summarize::run(args, &config()).await.unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}

#[tokio::test]
async fn test_assess_command_scores_edited_summary() {
    let args = assess::AssessArgs {
        thread: data("thread.json"),
        summary: data("edited_summary.json"),
        rule_based: true,
    };
    assess::run(args, &config()).await.unwrap();

    let raw = std::fs::read_to_string(data("edited_summary.json")).unwrap();
    let candidate: CandidateSummary = serde_json::from_str(&raw).unwrap();
    let thread: ThreadInput =
        serde_json::from_str(&std::fs::read_to_string(data("thread.json")).unwrap()).unwrap();
    let assessment = ReviewPipeline::rule_based()
        .assess_summary_confidence(&thread, &candidate)
        .await;
    assert_eq!(assessment.issues.len(), 4);
}
