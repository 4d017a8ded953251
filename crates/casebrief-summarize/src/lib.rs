//! Summary generation and confidence assessment for customer-service threads.
//!
//! Both entry points are total: service failures degrade to deterministic
//! rule-based output instead of surfacing as errors.

pub mod confidence;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod parser;
pub mod prompts;
pub mod retry;
mod service;

pub use confidence::rules::rule_based_assessment;
pub use confidence::ConfidenceAssessor;
pub use error::{InferenceError, ParseError};
pub use fallback::generate_rule_based_summary;
pub use generator::{
    Generated, GeneratorKind, RuleBasedGenerator, ServiceBackedGenerator, SummaryGenerator,
    Summarizer,
};
pub use parser::{
    adjust_confidence_score, parse_assessment_response, parse_summary_response, ServicePayload,
};
pub use prompts::{build_prompts, PromptPair};
pub use retry::{AttemptState, FailureClass, RetryPolicy};
