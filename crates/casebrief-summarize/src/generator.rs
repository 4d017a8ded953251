use crate::error::InferenceError;
use crate::fallback::generate_rule_based_summary;
use crate::parser::{adjust_confidence_score, parse_summary_response};
use crate::prompts::build_prompts;
use crate::retry::{classify, AttemptState, RetryPolicy};
use crate::service::bounded_chat;
use async_trait::async_trait;
use casebrief_llm::{ChatClient, ChatOptions, ChatRequest, Message};
use casebrief_types::{CustomerContext, GenerationConfig, SummaryResult, ThreadInput};
use serde::Serialize;
use std::sync::Arc;

/// Which strategy produced a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    ServiceBacked,
    RuleBased,
}

/// A summary plus which strategy actually produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub result: SummaryResult,
    /// Differs from the selected strategy when the service path fell back
    pub produced_by: GeneratorKind,
    /// Completion requests made, zero for the rule-based path
    pub attempts: u32,
}

/// Turns a thread into a validated [`SummaryResult`]
///
/// Implementations never fail: every error path ends in a usable result.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn generate_traced(
        &self,
        thread: &ThreadInput,
        context: Option<&CustomerContext>,
    ) -> Generated;

    async fn generate(
        &self,
        thread: &ThreadInput,
        context: Option<&CustomerContext>,
    ) -> SummaryResult {
        self.generate_traced(thread, context).await.result
    }

    fn kind(&self) -> GeneratorKind;
}

/// Deterministic, offline generator
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedGenerator;

#[async_trait]
impl SummaryGenerator for RuleBasedGenerator {
    async fn generate_traced(
        &self,
        thread: &ThreadInput,
        _context: Option<&CustomerContext>,
    ) -> Generated {
        Generated {
            result: generate_rule_based_summary(thread),
            produced_by: GeneratorKind::RuleBased,
            attempts: 0,
        }
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::RuleBased
    }
}

/// Completion-service generator with bounded retries and rule-based fallback
pub struct ServiceBackedGenerator {
    client: Arc<dyn ChatClient>,
    config: GenerationConfig,
    policy: RetryPolicy,
    fallback: RuleBasedGenerator,
}

impl ServiceBackedGenerator {
    pub fn new(client: Arc<dyn ChatClient>, config: GenerationConfig) -> Self {
        let policy = RetryPolicy::from_config(&config);
        Self {
            client,
            config,
            policy,
            fallback: RuleBasedGenerator,
        }
    }

    fn build_request(&self, thread: &ThreadInput, context: Option<&CustomerContext>) -> ChatRequest {
        let prompts = build_prompts(thread, context);
        let options = ChatOptions::new()
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .timeout(self.config.timeout())
            .title(self.config.title.clone());

        ChatRequest::new(
            self.config.model.clone(),
            vec![Message::system(prompts.system), Message::human(prompts.user)],
        )
        .with_options(options)
    }

    /// One request/parse/adjust cycle
    async fn attempt(
        &self,
        thread: &ThreadInput,
        context: Option<&CustomerContext>,
    ) -> Result<SummaryResult, InferenceError> {
        let request = self.build_request(thread, context);
        let response = bounded_chat(self.client.as_ref(), request, self.config.timeout()).await?;

        let parsed = parse_summary_response(&response.content)?;
        let adjusted = adjust_confidence_score(&parsed);

        tracing::debug!(
            reported = parsed.confidence_score,
            adjusted,
            "Adjusted model confidence score"
        );

        Ok(parsed.with_confidence_score(adjusted))
    }

    /// Runs attempt `attempt` and decides the next state
    async fn step(
        &self,
        attempt: u32,
        thread: &ThreadInput,
        context: Option<&CustomerContext>,
    ) -> AttemptState<SummaryResult> {
        match self.attempt(thread, context).await {
            Ok(result) => AttemptState::Succeeded(result),
            Err(err) => {
                let class = classify(&err);
                tracing::warn!(
                    order_id = %thread.order_id,
                    attempt,
                    max_attempts = self.policy.max_attempts,
                    ?class,
                    error = %err,
                    "Summary attempt failed"
                );
                self.policy.after_failure(attempt, class)
            }
        }
    }
}

#[async_trait]
impl SummaryGenerator for ServiceBackedGenerator {
    async fn generate_traced(
        &self,
        thread: &ThreadInput,
        context: Option<&CustomerContext>,
    ) -> Generated {
        let mut state = self.policy.start();
        let mut attempts = 0;

        loop {
            state = match state {
                AttemptState::Attempting(attempt) => {
                    attempts = attempt;
                    self.step(attempt, thread, context).await
                }
                AttemptState::Waiting { next_attempt, delay } => {
                    tracing::debug!(next_attempt, delay_ms = delay.as_millis() as u64, "Backing off");
                    tokio::time::sleep(delay).await;
                    AttemptState::Attempting(next_attempt)
                }
                AttemptState::Succeeded(result) => {
                    tracing::info!(
                        order_id = %thread.order_id,
                        confidence = result.confidence_score,
                        "Summary generated by completion service"
                    );
                    return Generated {
                        result,
                        produced_by: GeneratorKind::ServiceBacked,
                        attempts,
                    };
                }
                AttemptState::Exhausted => {
                    tracing::warn!(
                        order_id = %thread.order_id,
                        attempts,
                        "All summary attempts failed, using rule-based fallback"
                    );
                    return Generated {
                        attempts,
                        ..self.fallback.generate_traced(thread, context).await
                    };
                }
            };
        }
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::ServiceBacked
    }
}

/// Caller-facing summary entry point
///
/// Holds an optional completion client; its presence decides, per call, which
/// [`SummaryGenerator`] runs.
#[derive(Clone)]
pub struct Summarizer {
    client: Option<Arc<dyn ChatClient>>,
    config: GenerationConfig,
}

impl Summarizer {
    pub fn new(client: Option<Arc<dyn ChatClient>>, config: GenerationConfig) -> Self {
        Self { client, config }
    }

    /// Summarizer with no completion service configured
    pub fn rule_based() -> Self {
        Self::new(None, GenerationConfig::default())
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn select(&self) -> Box<dyn SummaryGenerator> {
        match &self.client {
            Some(client) => Box::new(ServiceBackedGenerator::new(
                Arc::clone(client),
                self.config.clone(),
            )),
            None => Box::new(RuleBasedGenerator),
        }
    }

    pub async fn generate_summary(
        &self,
        thread: &ThreadInput,
        context: Option<&CustomerContext>,
    ) -> SummaryResult {
        self.generate_traced(thread, context).await.result
    }

    pub async fn generate_traced(
        &self,
        thread: &ThreadInput,
        context: Option<&CustomerContext>,
    ) -> Generated {
        let generator = self.select();
        if generator.kind() == GeneratorKind::RuleBased {
            tracing::warn!("Completion service credential not configured, using rule-based summary");
        }
        generator.generate_traced(thread, context).await
    }
}
