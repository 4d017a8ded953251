use crate::error::{check_unit, SchemaError};
use serde::{Deserialize, Serialize};

/// Per-criterion quality scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaScores {
    pub accuracy: f64,
    pub completeness: f64,
    pub clarity: f64,
    pub sentiment_match: f64,
    pub action_relevance: f64,
}

impl CriteriaScores {
    pub const ACCURACY_WEIGHT: f64 = 0.25;
    pub const COMPLETENESS_WEIGHT: f64 = 0.25;
    pub const CLARITY_WEIGHT: f64 = 0.15;
    pub const SENTIMENT_MATCH_WEIGHT: f64 = 0.15;
    pub const ACTION_RELEVANCE_WEIGHT: f64 = 0.20;

    /// Every criterion set to the same value
    pub fn uniform(score: f64) -> Self {
        Self {
            accuracy: score,
            completeness: score,
            clarity: score,
            sentiment_match: score,
            action_relevance: score,
        }
    }

    pub fn weighted_average(&self) -> f64 {
        self.accuracy * Self::ACCURACY_WEIGHT
            + self.completeness * Self::COMPLETENESS_WEIGHT
            + self.clarity * Self::CLARITY_WEIGHT
            + self.sentiment_match * Self::SENTIMENT_MATCH_WEIGHT
            + self.action_relevance * Self::ACTION_RELEVANCE_WEIGHT
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        check_unit("criteriaScores.accuracy", self.accuracy)?;
        check_unit("criteriaScores.completeness", self.completeness)?;
        check_unit("criteriaScores.clarity", self.clarity)?;
        check_unit("criteriaScores.sentimentMatch", self.sentiment_match)?;
        check_unit("criteriaScores.actionRelevance", self.action_relevance)
    }
}

/// Second-pass judgement of how far a summary can be trusted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceAssessment {
    pub score: f64,
    pub reasoning: String,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    pub criteria_scores: CriteriaScores,
}

impl ConfidenceAssessment {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_unit("score", self.score)?;
        self.criteria_scores.validate()
    }
}
