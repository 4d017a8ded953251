use crate::error::ParseError;
use casebrief_types::{ConfidenceAssessment, SchemaError, SummaryResult};
use serde::de::DeserializeOwned;

/// A payload the completion service is asked to return as JSON
pub trait ServicePayload: DeserializeOwned {
    /// Constraints beyond field presence and enum membership
    fn check(&self) -> Result<(), SchemaError>;
}

impl ServicePayload for SummaryResult {
    fn check(&self) -> Result<(), SchemaError> {
        self.validate()
    }
}

impl ServicePayload for ConfidenceAssessment {
    fn check(&self) -> Result<(), SchemaError> {
        self.validate()
    }
}

/// Every balanced `{ ... }` span in free-form model output, in order of its opening brace.
///
/// Braces inside JSON strings are skipped, so commentary after the object
/// (even commentary containing braces) is not swallowed.
pub fn json_object_spans(text: &str) -> impl Iterator<Item = &str> {
    text.char_indices()
        .filter(|(_, ch)| *ch == '{')
        .filter_map(move |(start, _)| balanced_object_at(text, start))
}

/// The first balanced span, see [`json_object_spans`]
pub fn extract_json_object(text: &str) -> Option<&str> {
    json_object_spans(text).next()
}

fn balanced_object_at(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Deserializes and validates a payload.
///
/// Balanced spans are tried in order and the first that deserializes wins;
/// if none does, the whole text is tried. The error reported is the first
/// span's, or `NoJsonObject` when the text holds no balanced span at all.
pub fn parse_payload<T: ServicePayload>(text: &str) -> Result<T, ParseError> {
    let text = text.trim();

    let mut first_error = None;
    let mut parsed = None;
    for candidate in json_object_spans(text) {
        match serde_json::from_str::<T>(candidate) {
            Ok(value) => {
                parsed = Some(value);
                break;
            }
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    let value: T = match parsed {
        Some(value) => value,
        None => serde_json::from_str(text).map_err(|_| match first_error {
            Some(err) => ParseError::from(err),
            None => ParseError::NoJsonObject,
        })?,
    };

    value.check()?;
    Ok(value)
}

pub fn parse_summary_response(text: &str) -> Result<SummaryResult, ParseError> {
    parse_payload(text)
}

pub fn parse_assessment_response(text: &str) -> Result<ConfidenceAssessment, ParseError> {
    parse_payload(text)
}

/// Shrinks the model-reported score when the answer is suspiciously thin
pub fn adjust_confidence_score(result: &SummaryResult) -> f64 {
    let mut score = result.confidence_score;

    if result.summary.chars().count() < 20 {
        score *= 0.7;
    }
    if result.key_issue.chars().count() < 10 {
        score *= 0.8;
    }
    if result.recommended_action.chars().count() < 10 {
        score *= 0.9;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebrief_types::{CurrentStatus, Sentiment};
    use proptest::prelude::*;

    const VALID: &str = r#"{
        "summary": "Customer's blender arrived with a cracked jar and they want a refund.",
        "keyIssue": "Blender jar cracked in transit",
        "sentiment": "frustrated",
        "currentStatus": "unresolved",
        "recommendedAction": "Issue a refund and send a prepaid return label",
        "confidenceScore": 0.9
    }"#;

    fn sample() -> SummaryResult {
        parse_summary_response(VALID).unwrap()
    }

    #[test]
    fn test_parse_plain_json() {
        let result = sample();
        assert_eq!(result.sentiment, Sentiment::Frustrated);
        assert_eq!(result.current_status, CurrentStatus::Unresolved);
        assert_eq!(result.confidence_score, 0.9);
        assert_eq!(result.additional_context, None);
    }

    #[test]
    fn test_parse_fenced_json_with_preamble() {
        let text = format!("Here is the analysis:\n```json\n{}\n```", VALID);
        assert_eq!(parse_summary_response(&text).unwrap(), sample());
    }

    #[test]
    fn test_trailing_commentary_with_braces() {
        let text = format!(
            "{}\n\nNote: I assumed {{order}} refers to the original purchase {{not the replacement}}.",
            VALID
        );
        assert_eq!(parse_summary_response(&text).unwrap(), sample());
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"{"summary":"Customer typed {broken} and } in the form, very confused",
            "keyIssue":"Form input garbled","sentiment":"neutral","currentStatus":"pending",
            "recommendedAction":"Ask for clarification","confidenceScore":0.5} trailing }"#;
        let result = parse_summary_response(text).unwrap();
        assert_eq!(result.summary, "Customer typed {broken} and } in the form, very confused");
    }

    #[test]
    fn test_no_json_object() {
        let err = parse_summary_response("I could not analyze this thread.").unwrap_err();
        assert!(matches!(err, ParseError::NoJsonObject));
    }

    #[test]
    fn test_unbalanced_object_is_invalid() {
        let err = parse_summary_response(r#"{"summary": "cut off"#).unwrap_err();
        assert!(matches!(err, ParseError::NoJsonObject));
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let text = r#"{"summary":"Long enough summary text","keyIssue":"Something",
            "sentiment":"neutral","recommendedAction":"Reply","confidenceScore":0.4}"#;
        let err = parse_summary_response(text).unwrap_err();
        assert!(matches!(err, ParseError::Schema(_)));
        assert!(err.to_string().contains("currentStatus"));
    }

    #[test]
    fn test_enum_mismatch_is_schema_error() {
        let text = VALID.replace("\"frustrated\"", "\"confused\"");
        assert!(matches!(parse_summary_response(&text).unwrap_err(), ParseError::Schema(_)));
    }

    #[test]
    fn test_score_out_of_range_is_constraint_error() {
        let text = VALID.replace("0.9", "1.7");
        assert!(matches!(parse_summary_response(&text).unwrap_err(), ParseError::Constraint(_)));
    }

    #[test]
    fn test_malformed_json_is_invalid_json() {
        let err = parse_summary_response(r#"{"summary": nope}"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn test_round_trip() {
        let original = SummaryResult {
            additional_context: Some("Second complaint this month".to_string()),
            ..sample()
        };
        let serialized = serde_json::to_string(&original).unwrap();
        assert_eq!(parse_summary_response(&serialized).unwrap(), original);
    }

    #[test]
    fn test_schema_echo_before_answer() {
        let text = format!("Using the {{schema}} you gave me:\n{}", VALID);
        assert_eq!(parse_summary_response(&text).unwrap(), sample());
    }

    #[test]
    fn test_later_span_failure_keeps_first_error() {
        let err = parse_summary_response(r#"{nope} and {"summary": 1}"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    fn arb_summary() -> impl Strategy<Value = SummaryResult> {
        (
            (".*", ".*", ".*"),
            prop::sample::select(Sentiment::ALL.to_vec()),
            prop::sample::select(vec![
                CurrentStatus::Unresolved,
                CurrentStatus::Pending,
                CurrentStatus::Resolved,
            ]),
            0.0f64..=1.0,
            prop::option::of(".*"),
        )
            .prop_map(
                |((summary, key_issue, recommended_action), sentiment, current_status, score, extra)| {
                    SummaryResult {
                        summary,
                        key_issue,
                        sentiment,
                        current_status,
                        recommended_action,
                        confidence_score: score,
                        additional_context: extra,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn prop_serialized_summary_parses_back(original in arb_summary()) {
            let serialized = serde_json::to_string(&original).unwrap();
            prop_assert_eq!(parse_summary_response(&serialized).unwrap(), original);
        }
    }

    #[test]
    fn test_adjust_keeps_complete_answer() {
        assert_eq!(adjust_confidence_score(&sample()), 0.9);
    }

    #[test]
    fn test_adjust_penalizes_short_fields() {
        let thin = SummaryResult {
            summary: "Broken jar".to_string(),
            key_issue: "Jar".to_string(),
            recommended_action: "Refund".to_string(),
            confidence_score: 1.0,
            ..sample()
        };
        let expected = 1.0 * 0.7 * 0.8 * 0.9;
        assert!((adjust_confidence_score(&thin) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_parse_assessment() {
        let text = r#"Assessment:
        {"score":0.7,"reasoning":"ok","issues":["vague action"],"strengths":[],
         "criteriaScores":{"accuracy":0.8,"completeness":0.7,"clarity":0.7,"sentimentMatch":0.6,"actionRelevance":0.5}}"#;
        let assessment = parse_assessment_response(text).unwrap();
        assert_eq!(assessment.issues, vec!["vague action".to_string()]);

        let bad = text.replace("\"clarity\":0.7", "\"clarity\":7");
        assert!(matches!(parse_assessment_response(&bad).unwrap_err(), ParseError::Constraint(_)));
    }
}
