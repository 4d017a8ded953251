use casebrief_llm::LlmError;
use casebrief_types::SchemaError;
use thiserror::Error;

/// Failure to turn model output into a validated result
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No JSON object found in response")]
    NoJsonObject,

    #[error("Malformed JSON in response: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Response does not match schema: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("Response violates schema constraint: {0}")]
    Constraint(#[from] SchemaError),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Self::Schema(err),
            _ => Self::InvalidJson(err),
        }
    }
}

/// One failed round-trip to the completion service
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error(transparent)]
    Service(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
