//! Second-pass scoring of a generated summary.
//!
//! The completion service is asked once to critique the summary; any failure,
//! or a missing client, routes to [`rules::rule_based_assessment`].

pub mod prompt;
pub mod rules;

use crate::error::InferenceError;
use crate::parser::parse_assessment_response;
use crate::service::bounded_chat;
use casebrief_llm::{ChatClient, ChatOptions, ChatRequest, Message};
use casebrief_types::{
    AssessmentConfig, CandidateSummary, ConfidenceAssessment, SummaryResult, ThreadInput,
};
use prompt::{build_confidence_prompt, CONFIDENCE_SYSTEM_PROMPT};
use rules::rule_based_assessment;
use std::sync::Arc;

#[derive(Clone)]
pub struct ConfidenceAssessor {
    client: Option<Arc<dyn ChatClient>>,
    config: AssessmentConfig,
}

impl ConfidenceAssessor {
    pub fn new(client: Option<Arc<dyn ChatClient>>, config: AssessmentConfig) -> Self {
        Self { client, config }
    }

    pub fn rule_based() -> Self {
        Self::new(None, AssessmentConfig::default())
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Scores a summary produced by this crate
    pub async fn assess_summary(
        &self,
        thread: &ThreadInput,
        summary: &SummaryResult,
    ) -> ConfidenceAssessment {
        self.assess(thread, &CandidateSummary::from(summary)).await
    }

    /// Scores any candidate, including reviewer edits that no longer match the schema
    pub async fn assess(
        &self,
        thread: &ThreadInput,
        candidate: &CandidateSummary,
    ) -> ConfidenceAssessment {
        let Some(client) = &self.client else {
            tracing::warn!("Completion service credential not configured, using rule-based confidence assessment");
            return rule_based_assessment(candidate);
        };

        match self.request_assessment(client.as_ref(), thread, candidate).await {
            Ok(assessment) => {
                tracing::info!(
                    order_id = %thread.order_id,
                    score = assessment.score,
                    "Confidence assessed by completion service"
                );
                assessment
            }
            Err(err) => {
                tracing::warn!(
                    order_id = %thread.order_id,
                    error = %err,
                    "Confidence assessment failed, using rule-based scoring"
                );
                rule_based_assessment(candidate)
            }
        }
    }

    async fn request_assessment(
        &self,
        client: &dyn ChatClient,
        thread: &ThreadInput,
        candidate: &CandidateSummary,
    ) -> Result<ConfidenceAssessment, InferenceError> {
        let options = ChatOptions::new()
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .timeout(self.config.timeout())
            .title(self.config.title.clone());

        let request = ChatRequest::new(
            self.config.model.clone(),
            vec![
                Message::system(CONFIDENCE_SYSTEM_PROMPT),
                Message::human(build_confidence_prompt(thread, candidate)),
            ],
        )
        .with_options(options);

        let response = bounded_chat(client, request, self.config.timeout()).await?;
        Ok(parse_assessment_response(&response.content)?)
    }
}
