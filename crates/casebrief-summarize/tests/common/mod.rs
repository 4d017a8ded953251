#![allow(dead_code)]

use async_trait::async_trait;
use casebrief_llm::{ChatClient, ChatRequest, ChatResponse, LlmError, StatusCode};
use casebrief_types::{Sender, ThreadInput, ThreadMessage};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the scripted client does for one call
pub enum Step {
    Reply(String),
    Status(u16),
    Fail(LlmError),
    /// Never answers within any sane timeout
    Stall,
}

/// In-memory [`ChatClient`] that replays a fixed script and counts calls
pub struct ScriptedClient {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call answers with the same HTTP status
    pub fn always_status(code: u16, times: usize) -> Self {
        Self::new((0..times).map(|_| Step::Status(code)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, request: ChatRequest) -> casebrief_llm::Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(content)) => Ok(ChatResponse {
                content,
                usage: None,
                finish_reason: Some("stop".to_string()),
                model: None,
            }),
            Some(Step::Status(code)) => Err(LlmError::Http {
                status: StatusCode::from_u16(code).unwrap(),
                body: String::new(),
            }),
            Some(Step::Fail(err)) => Err(err),
            Some(Step::Stall) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(LlmError::MissingContent)
            }
            None => panic!("scripted client called more times than scripted"),
        }
    }
}

pub fn thread() -> ThreadInput {
    ThreadInput::new("ORD-1001", "Wireless Headphones", "Defective product", "customer")
        .with_message(ThreadMessage::new(
            Sender::Customer,
            "2024-01-15T10:30:00Z",
            "The left earcup stopped working after two days. This is unacceptable and frustrating.",
        ))
        .with_message(ThreadMessage::new(
            Sender::Company,
            "2024-01-15T14:00:00Z",
            "We're sorry about that. We can send a replacement right away.",
        ))
}

pub const SUMMARY_JSON: &str = r#"{
    "summary": "Customer's new headphones lost audio in the left earcup within two days; a replacement was offered.",
    "keyIssue": "Left earcup failed after two days",
    "sentiment": "frustrated",
    "currentStatus": "pending",
    "recommendedAction": "Confirm shipping address and dispatch the replacement",
    "confidenceScore": 0.88
}"#;

pub const ASSESSMENT_JSON: &str = r#"{
    "score": 0.83,
    "reasoning": "Accurate and actionable",
    "issues": [],
    "strengths": ["Captures the defect", "Clear next step"],
    "criteriaScores": {
        "accuracy": 0.9,
        "completeness": 0.8,
        "clarity": 0.85,
        "sentimentMatch": 0.8,
        "actionRelevance": 0.75
    }
}"#;
