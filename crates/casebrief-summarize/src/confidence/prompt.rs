use casebrief_types::{CandidateSummary, ThreadInput};
use std::fmt::Write;

pub const CONFIDENCE_SYSTEM_PROMPT: &str = r#"You are a quality assessment expert for customer service email summaries. Your job is to evaluate how well an AI-generated summary captures the essence of a customer service email thread.

Evaluate summaries on these 5 criteria:
1. ACCURACY: Does the summary correctly represent what happened in the thread?
2. COMPLETENESS: Are all important details and context captured?
3. CLARITY: Is the summary clear, concise, and easy to understand?
4. SENTIMENT MATCH: Is the detected sentiment (frustrated/neutral/satisfied/angry) accurate?
5. ACTION RELEVANCE: Is the recommended action appropriate and actionable?

Always respond with valid JSON in this exact format:
{
  "score": 0.85,
  "reasoning": "Brief explanation of overall assessment",
  "issues": ["list of specific problems found"],
  "strengths": ["list of what the summary does well"],
  "criteriaScores": {
    "accuracy": 0.9,
    "completeness": 0.8,
    "clarity": 0.85,
    "sentimentMatch": 0.9,
    "actionRelevance": 0.8
  }
}

The overall score should be the weighted average of criteria scores."#;

/// Renders the thread with numbered messages followed by the candidate under review
pub fn build_confidence_prompt(thread: &ThreadInput, candidate: &CandidateSummary) -> String {
    let mut prompt = String::new();

    let _ = write!(
        prompt,
        "ORIGINAL EMAIL THREAD:\nOrder ID: {}\nProduct: {}\nTopic: {}\nInitiated by: {}\n\nMessages (chronological):\n",
        thread.order_id, thread.product, thread.topic, thread.initiated_by
    );

    let messages = thread
        .messages
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "{}. [{}] ({}): {}",
                i + 1,
                m.sender.as_str().to_uppercase(),
                m.timestamp,
                m.body
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    prompt.push_str(&messages);

    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    let _ = write!(
        prompt,
        "\n\nAI-GENERATED SUMMARY TO EVALUATE:\nSummary: \"{}\"\nKey Issue: \"{}\"\nSentiment: \"{}\"\nCurrent Status: \"{}\"\nRecommended Action: \"{}\"\n\n",
        candidate.summary,
        field(&candidate.key_issue),
        field(&candidate.sentiment),
        field(&candidate.current_status),
        field(&candidate.recommended_action),
    );

    prompt.push_str("Please assess this summary's quality and provide your evaluation in JSON format.");
    prompt
}
