use crate::provider::CustomerContextProvider;
use casebrief_summarize::{ConfidenceAssessor, GeneratorKind, Summarizer};
use casebrief_types::{
    CandidateSummary, ConfidenceAssessment, CustomerContext, Sender, SummaryResult, ThreadInput,
};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Invalid e-mail regex"));

/// First e-mail address in the first customer-authored message
pub fn extract_email(thread: &ThreadInput) -> Option<&str> {
    let first = thread.messages_from(Sender::Customer).next()?;
    EMAIL_PATTERN.find(&first.body).map(|m| m.as_str())
}

/// A generated summary together with its second-pass assessment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedSummary {
    pub id: Uuid,
    pub order_id: String,
    pub summary: SummaryResult,
    pub assessment: ConfidenceAssessment,
    /// Taken from the assessment, not from the generator's own estimate
    pub confidence_score: f64,
    pub strategy: GeneratorKind,
    pub model: String,
    pub attempts: u32,
    pub context_attached: bool,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

/// Context lookup, generation and assessment for one thread at a time
#[derive(Clone)]
pub struct ReviewPipeline {
    summarizer: Summarizer,
    assessor: ConfidenceAssessor,
    context_provider: Option<Arc<dyn CustomerContextProvider>>,
}

impl ReviewPipeline {
    pub fn new(
        summarizer: Summarizer,
        assessor: ConfidenceAssessor,
        context_provider: Option<Arc<dyn CustomerContextProvider>>,
    ) -> Self {
        Self {
            summarizer,
            assessor,
            context_provider,
        }
    }

    /// Pipeline that never contacts a completion service
    pub fn rule_based() -> Self {
        Self::new(Summarizer::rule_based(), ConfidenceAssessor::rule_based(), None)
    }

    pub async fn generate_summary(
        &self,
        thread: &ThreadInput,
        context: Option<&CustomerContext>,
    ) -> SummaryResult {
        self.summarizer.generate_summary(thread, context).await
    }

    pub async fn assess_summary_confidence(
        &self,
        thread: &ThreadInput,
        summary: &CandidateSummary,
    ) -> ConfidenceAssessment {
        self.assessor.assess(thread, summary).await
    }

    /// Looks up customer context from the thread, then summarizes and assesses
    pub async fn review(&self, thread: &ThreadInput) -> AnnotatedSummary {
        let started = Instant::now();
        let context = self.lookup_context(thread).await;
        self.annotate(thread, context.as_ref(), started).await
    }

    /// Same as [`review`](Self::review) with caller-supplied context
    pub async fn review_with_context(
        &self,
        thread: &ThreadInput,
        context: Option<CustomerContext>,
    ) -> AnnotatedSummary {
        self.annotate(thread, context.as_ref(), Instant::now()).await
    }

    async fn lookup_context(&self, thread: &ThreadInput) -> Option<CustomerContext> {
        let provider = self.context_provider.as_ref()?;
        let email = extract_email(thread)?;

        match provider.customer_context(email).await {
            Ok(context) => {
                tracing::debug!(order_id = %thread.order_id, "Customer context attached");
                Some(context)
            }
            Err(err) => {
                tracing::warn!(
                    order_id = %thread.order_id,
                    error = %err,
                    "Failed to fetch customer context, proceeding without it"
                );
                None
            }
        }
    }

    async fn annotate(
        &self,
        thread: &ThreadInput,
        context: Option<&CustomerContext>,
        started: Instant,
    ) -> AnnotatedSummary {
        let generated = self.summarizer.generate_traced(thread, context).await;
        let assessment = self.assessor.assess_summary(thread, &generated.result).await;

        let annotated = AnnotatedSummary {
            id: Uuid::new_v4(),
            order_id: thread.order_id.clone(),
            confidence_score: assessment.score,
            summary: generated.result,
            assessment,
            strategy: generated.produced_by,
            model: self.summarizer.config().model.clone(),
            attempts: generated.attempts,
            context_attached: context.is_some(),
            generated_at: Utc::now(),
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!(
            order_id = %annotated.order_id,
            strategy = ?annotated.strategy,
            confidence = annotated.confidence_score,
            processing_time_ms = annotated.processing_time_ms,
            "Thread reviewed"
        );

        annotated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebrief_types::ThreadMessage;

    fn thread_with(bodies: &[(Sender, &str)]) -> ThreadInput {
        bodies.iter().fold(
            ThreadInput::new("ORD-9", "Lamp", "Flickering", "customer"),
            |t, (sender, body)| t.with_message(ThreadMessage::new(*sender, "t", *body)),
        )
    }

    #[test]
    fn test_extract_email_from_first_customer_message() {
        let thread = thread_with(&[
            (Sender::Company, "Reach us at help@shop.example"),
            (Sender::Customer, "Hi, this is jane.doe@mail.example.com, my lamp flickers"),
            (Sender::Customer, "Also try other@mail.example.com"),
        ]);
        assert_eq!(extract_email(&thread), Some("jane.doe@mail.example.com"));
    }

    #[test]
    fn test_extract_email_only_looks_at_first_customer_message() {
        let thread = thread_with(&[
            (Sender::Customer, "No address here"),
            (Sender::Customer, "late@mail.example.com"),
        ]);
        assert_eq!(extract_email(&thread), None);
    }
}
