use crate::error::{check_unit, SchemaError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Frustrated,
    Neutral,
    Satisfied,
    Angry,
}

impl Sentiment {
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Frustrated,
        Sentiment::Neutral,
        Sentiment::Satisfied,
        Sentiment::Angry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Frustrated => "frustrated",
            Sentiment::Neutral => "neutral",
            Sentiment::Satisfied => "satisfied",
            Sentiment::Angry => "angry",
        }
    }

    /// Exact, case-sensitive match against the wire labels
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrentStatus {
    Unresolved,
    Pending,
    Resolved,
}

impl CurrentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentStatus::Unresolved => "unresolved",
            CurrentStatus::Pending => "pending",
            CurrentStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for CurrentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured summary of a thread, produced by any summarization strategy
///
/// Field names on the wire match what the completion service is asked to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    pub key_issue: String,
    pub sentiment: Sentiment,
    pub current_status: CurrentStatus,
    pub recommended_action: String,
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

impl SummaryResult {
    /// Checks the constraints serde cannot express
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_unit("confidenceScore", self.confidence_score)
    }

    /// Copy with a different confidence score; results are never edited in place
    pub fn with_confidence_score(&self, confidence_score: f64) -> Self {
        Self {
            confidence_score,
            ..self.clone()
        }
    }
}

/// A summary as submitted for assessment
///
/// Looser than [`SummaryResult`]: a reviewer-edited summary may carry a sentiment
/// outside the enum or drop fields, and still has to be scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_issue: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub current_status: Option<String>,
    #[serde(default)]
    pub recommended_action: Option<String>,
}

impl CandidateSummary {
    pub fn has_valid_sentiment(&self) -> bool {
        self.sentiment
            .as_deref()
            .and_then(Sentiment::from_label)
            .is_some()
    }
}

impl From<&SummaryResult> for CandidateSummary {
    fn from(result: &SummaryResult) -> Self {
        Self {
            summary: result.summary.clone(),
            key_issue: Some(result.key_issue.clone()),
            sentiment: Some(result.sentiment.to_string()),
            current_status: Some(result.current_status.to_string()),
            recommended_action: Some(result.recommended_action.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SummaryResult {
        SummaryResult {
            summary: "Customer received a cracked monitor and wants a replacement.".to_string(),
            key_issue: "Monitor arrived damaged".to_string(),
            sentiment: Sentiment::Frustrated,
            current_status: CurrentStatus::Pending,
            recommended_action: "Ship a replacement and follow up in 3 days".to_string(),
            confidence_score: 0.82,
            additional_context: None,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["keyIssue"], "Monitor arrived damaged");
        assert_eq!(json["currentStatus"], "pending");
        assert_eq!(json["sentiment"], "frustrated");
        assert!(json.get("additionalContext").is_none());
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        assert!(sample().validate().is_ok());
        assert!(sample().with_confidence_score(1.0).validate().is_ok());
        assert!(sample().with_confidence_score(0.0).validate().is_ok());

        let err = sample().with_confidence_score(1.2).validate().unwrap_err();
        assert_eq!(
            err,
            SchemaError::OutOfRange {
                field: "confidenceScore",
                value: 1.2
            }
        );
        assert!(sample().with_confidence_score(-0.1).validate().is_err());
        assert!(sample().with_confidence_score(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_unknown_sentiment_rejected_by_serde() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json["sentiment"] = "confused".into();
        assert!(serde_json::from_value::<SummaryResult>(json).is_err());
    }

    #[test]
    fn test_sentiment_from_label() {
        assert_eq!(Sentiment::from_label("angry"), Some(Sentiment::Angry));
        assert_eq!(Sentiment::from_label("Angry"), None);
        assert_eq!(Sentiment::from_label("confused"), None);
    }

    #[test]
    fn test_candidate_from_result() {
        let candidate = CandidateSummary::from(&sample());
        assert_eq!(candidate.sentiment.as_deref(), Some("frustrated"));
        assert!(candidate.has_valid_sentiment());

        let edited = CandidateSummary {
            sentiment: Some("confused".to_string()),
            ..candidate
        };
        assert!(!edited.has_valid_sentiment());
    }
}
