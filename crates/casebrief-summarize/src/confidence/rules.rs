use casebrief_types::{CandidateSummary, ConfidenceAssessment, CriteriaScores};

pub const RULE_BASED_REASONING: &str = "Rule-based confidence assessment (LLM validation unavailable)";

const BASELINE: f64 = 0.6;
const MIN_SCORE: f64 = 0.1;
const MAX_SCORE: f64 = 1.0;

/// Heuristic scoring used when the completion service cannot judge the summary
pub fn rule_based_assessment(candidate: &CandidateSummary) -> ConfidenceAssessment {
    let mut scores = CriteriaScores::uniform(BASELINE);
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    let summary_len = candidate.summary.chars().count();
    if summary_len < 20 {
        scores.completeness -= 0.3;
        scores.clarity -= 0.2;
        issues.push("Summary text is too short or missing".to_string());
    } else if summary_len > 100 {
        scores.completeness += 0.2;
        strengths.push("Detailed summary provided".to_string());
    }

    match candidate.key_issue.as_deref() {
        Some(issue) if issue != "Unknown" && issue.chars().count() >= 10 => {
            strengths.push("Key issue clearly identified".to_string());
        }
        _ => {
            scores.completeness -= 0.2;
            scores.accuracy -= 0.2;
            issues.push("Key issue not properly identified".to_string());
        }
    }

    let action = candidate.recommended_action.as_deref().unwrap_or_default();
    if action.chars().count() < 15 {
        scores.action_relevance -= 0.3;
        issues.push("Recommended action is too vague or missing".to_string());
    } else if action.contains("contact") || action.contains("follow up") {
        scores.action_relevance += 0.1;
        strengths.push("Actionable recommendation provided".to_string());
    }

    if candidate.has_valid_sentiment() {
        strengths.push("Valid sentiment classification".to_string());
    } else {
        scores.sentiment_match -= 0.3;
        issues.push("Invalid or missing sentiment classification".to_string());
    }

    ConfidenceAssessment {
        score: scores.weighted_average().clamp(MIN_SCORE, MAX_SCORE),
        reasoning: RULE_BASED_REASONING.to_string(),
        issues,
        strengths,
        criteria_scores: scores,
    }
}
