//! Prelude module for convenient imports
//!
//! ```rust
//! use casebrief::prelude::*;
//! ```

pub use crate::{
    AnnotatedSummary, CustomerContextProvider, PipelineBuilder, ReviewPipeline,
    AssessmentConfig, GenerationConfig,
    CandidateSummary, ConfidenceAssessment, CurrentStatus, CustomerContext, Sentiment,
    Sender, SummaryResult, ThreadInput, ThreadMessage,
    ChatClient, OpenRouterClient, ProviderConfig,
    GeneratorKind,
};
