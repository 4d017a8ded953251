//! Bounded retry with per-failure back-off, as an explicit state machine.
//!
//! ```text
//! Attempting(n) --ok--------------------------------> Succeeded
//! Attempting(n) --RateLimited/Transient, n < max----> Waiting(n + 1, delay) --> Attempting(n + 1)
//! Attempting(n) --RateLimited/Transient, n == max---> Exhausted
//! Attempting(n) --Permanent-------------------------> Exhausted
//! ```

use crate::error::InferenceError;
use casebrief_types::GenerationConfig;
use std::time::Duration;

/// How a failed attempt affects the retry loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// HTTP 429, exponential back-off
    RateLimited,
    /// HTTP 5xx or timeout, linear back-off
    Transient,
    /// Anything else: client errors, malformed or invalid output
    Permanent,
}

pub fn classify(error: &InferenceError) -> FailureClass {
    match error {
        InferenceError::Service(err) => match err.status().map(|s| s.as_u16()) {
            Some(429) => FailureClass::RateLimited,
            Some(code) if code >= 500 => FailureClass::Transient,
            None if err.is_timeout() => FailureClass::Transient,
            _ => FailureClass::Permanent,
        },
        InferenceError::Parse(_) => FailureClass::Permanent,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptState<T> {
    /// About to make attempt `n` (1-based)
    Attempting(u32),
    Waiting { next_attempt: u32, delay: Duration },
    Exhausted,
    Succeeded(T),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay())
    }

    pub fn start<T>(&self) -> AttemptState<T> {
        if self.max_attempts == 0 {
            AttemptState::Exhausted
        } else {
            AttemptState::Attempting(1)
        }
    }

    /// Delay before retrying after `attempt` failed, `None` if the failure is final
    pub fn backoff(&self, class: FailureClass, attempt: u32) -> Option<Duration> {
        match class {
            FailureClass::RateLimited => Some(
                self.base_delay
                    .saturating_mul(2u32.saturating_pow(attempt)),
            ),
            FailureClass::Transient => Some(self.base_delay.saturating_mul(attempt)),
            FailureClass::Permanent => None,
        }
    }

    pub fn after_failure<T>(&self, attempt: u32, class: FailureClass) -> AttemptState<T> {
        match self.backoff(class, attempt) {
            Some(delay) if attempt < self.max_attempts => AttemptState::Waiting {
                next_attempt: attempt + 1,
                delay,
            },
            _ => AttemptState::Exhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use casebrief_llm::{LlmError, StatusCode};

    fn status(code: u16) -> LlmError {
        LlmError::Http {
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1000))
    }

    #[test]
    fn test_classify_by_status() {
        assert_eq!(classify(&status(429).into()), FailureClass::RateLimited);
        assert_eq!(classify(&status(500).into()), FailureClass::Transient);
        assert_eq!(classify(&status(503).into()), FailureClass::Transient);
        assert_eq!(classify(&status(400).into()), FailureClass::Permanent);
        assert_eq!(classify(&status(401).into()), FailureClass::Permanent);
        assert_eq!(classify(&status(408).into()), FailureClass::Permanent);
    }

    #[test]
    fn test_classify_non_http_failures() {
        assert_eq!(classify(&LlmError::Timeout.into()), FailureClass::Transient);
        assert_eq!(classify(&LlmError::MissingContent.into()), FailureClass::Permanent);
        assert_eq!(
            classify(&InferenceError::Parse(ParseError::NoJsonObject)),
            FailureClass::Permanent
        );
    }

    #[test]
    fn test_backoff_table() {
        let p = policy();
        assert_eq!(p.backoff(FailureClass::RateLimited, 1), Some(Duration::from_secs(2)));
        assert_eq!(p.backoff(FailureClass::RateLimited, 2), Some(Duration::from_secs(4)));
        assert_eq!(p.backoff(FailureClass::Transient, 1), Some(Duration::from_secs(1)));
        assert_eq!(p.backoff(FailureClass::Transient, 2), Some(Duration::from_secs(2)));
        assert_eq!(p.backoff(FailureClass::Permanent, 1), None);
    }

    #[test]
    fn test_transitions() {
        let p = policy();
        assert_eq!(p.start::<()>(), AttemptState::Attempting(1));
        assert_eq!(
            p.after_failure::<()>(1, FailureClass::RateLimited),
            AttemptState::Waiting {
                next_attempt: 2,
                delay: Duration::from_secs(2)
            }
        );
        assert_eq!(p.after_failure::<()>(3, FailureClass::Transient), AttemptState::Exhausted);
        assert_eq!(p.after_failure::<()>(1, FailureClass::Permanent), AttemptState::Exhausted);
    }

    #[test]
    fn test_zero_attempts_exhausted_immediately() {
        let p = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(p.start::<()>(), AttemptState::Exhausted);
    }
}
