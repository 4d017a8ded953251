//! Deterministic summarizer used when the completion service is unavailable.

use casebrief_types::{CurrentStatus, Sentiment, Sender, SummaryResult, ThreadInput};

/// Fixed score that marks a summary as machine-guessed
pub const RULE_BASED_CONFIDENCE: f64 = 0.3;

pub const RULE_BASED_NOTE: &str = "Generated using rule-based fallback (NLP service unavailable)";

/// Checked in order; on a tie the earlier category wins
const SENTIMENT_KEYWORDS: [(Sentiment, &[&str]); 3] = [
    (
        Sentiment::Frustrated,
        &["frustrated", "annoying", "unacceptable", "disappointing", "unhappy", "upset"],
    ),
    (
        Sentiment::Angry,
        &["angry", "furious", "outrageous", "terrible", "horrible", "worst"],
    ),
    (
        Sentiment::Satisfied,
        &["happy", "great", "excellent", "perfect", "satisfied", "thank you", "thanks"],
    ),
];

const RESOLUTION_KEYWORDS: [&str; 3] = ["replacement", "refund", "sorry"];

/// Picks the category with the most distinct keyword hits across customer messages
pub fn infer_sentiment(thread: &ThreadInput) -> Sentiment {
    let customer_text = thread
        .messages_from(Sender::Customer)
        .map(|m| m.body.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let mut best = (0, Sentiment::Neutral);
    for (sentiment, keywords) in SENTIMENT_KEYWORDS {
        let hits = keywords.iter().filter(|k| customer_text.contains(*k)).count();
        if hits > best.0 {
            best = (hits, sentiment);
        }
    }

    best.1
}

/// True when the company has already apologized or offered a remedy
pub fn has_resolution_language(thread: &ThreadInput) -> bool {
    thread.messages_from(Sender::Company).any(|m| {
        let body = m.body.to_lowercase();
        RESOLUTION_KEYWORDS.iter().any(|k| body.contains(k))
    })
}

pub fn generate_rule_based_summary(thread: &ThreadInput) -> SummaryResult {
    let resolving = has_resolution_language(thread);

    let (current_status, recommended_action) = if resolving {
        (
            CurrentStatus::Pending,
            "Follow up with customer to ensure issue is resolved",
        )
    } else {
        (
            CurrentStatus::Unresolved,
            "Review thread and provide resolution to customer",
        )
    };

    SummaryResult {
        summary: format!(
            "Customer contacted regarding {} for order {} ({}). Thread contains {} messages.",
            thread.topic,
            thread.order_id,
            thread.product,
            thread.messages.len()
        ),
        key_issue: thread.topic.clone(),
        sentiment: infer_sentiment(thread),
        current_status,
        recommended_action: recommended_action.to_string(),
        confidence_score: RULE_BASED_CONFIDENCE,
        additional_context: Some(RULE_BASED_NOTE.to_string()),
    }
}
