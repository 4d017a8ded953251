//! # Casebrief
//!
//! Structured summaries of customer-service email threads, each annotated with
//! a trust score so a reviewer knows how much checking it needs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use casebrief::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = PipelineBuilder::new()
//!         .api_key(std::env::var("OPENROUTER_API_KEY").ok())
//!         .build()?;
//!
//!     let thread = ThreadInput::new("ORD-1001", "Wireless Headphones", "Defective product", "customer")
//!         .with_message(ThreadMessage::new(
//!             Sender::Customer,
//!             "2024-01-15T10:30:00Z",
//!             "The left earcup stopped working after two days.",
//!         ));
//!
//!     let annotated = pipeline.review(&thread).await;
//!     println!("{} ({:.2})", annotated.summary.summary, annotated.confidence_score);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`casebrief-llm`**: chat-completion client for OpenRouter
//! - **`casebrief-types`**: thread, context, summary and assessment types
//! - **`casebrief-summarize`**: prompts, parsing, retries and rule-based fallbacks
//!
//! Without an API key every step runs on deterministic rules; a degraded result
//! is always returned instead of an error.

pub mod builder;
pub mod pipeline;
pub mod prelude;
pub mod provider;

pub use builder::PipelineBuilder;
pub use pipeline::{extract_email, AnnotatedSummary, ReviewPipeline};
pub use provider::CustomerContextProvider;

pub use casebrief_llm::{
    ChatClient, ChatOptions, ChatRequest, ChatResponse, ClientFactory, LlmError, Message,
    OpenRouterClient, ProviderConfig,
};

pub use casebrief_types::{
    AssessmentConfig, CandidateSummary, ConfidenceAssessment, CriteriaScores, CurrentStatus,
    CustomerContext, CustomerProfile, CustomerTier, GenerationConfig, OrderRecord, Sender,
    Sentiment, SummaryResult, ThreadInput, ThreadMessage, TicketRecord,
};

pub use casebrief_summarize::{
    ConfidenceAssessor, Generated, GeneratorKind, RuleBasedGenerator, ServiceBackedGenerator,
    SummaryGenerator, Summarizer,
};

/// Lower-level building blocks
pub mod summarize {
    pub use casebrief_summarize::*;
}
