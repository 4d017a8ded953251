use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Completion service error ({status}): {body}")]
    Http { status: StatusCode, body: String },

    #[error("Completion request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("No content in completion response")]
    MissingContent,

    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl LlmError {
    /// HTTP status returned by the service, if the request got that far
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;
