// src/models/evaluation.rs

use serde::{Deserialize, Serialize};

use crate::models::submission::Participant;

/// One row per available label of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedOption {
    pub label: String,
    pub user_checked: bool,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionEvaluated {
    pub id: String,
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    /// True when any available label was checked, right or wrong.
    pub user_attempted: bool,
    /// In `[0, 1]`.
    pub score: f64,
    pub evaluated_options: Vec<EvaluatedOption>,
}

/// Outcome of grading one submission. Returned to the caller and handed
/// unchanged to the participation sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub quiz_id: String,
    pub score_sum: f64,
    pub participant: Participant,
    pub questions_evaluated: Vec<QuestionEvaluated>,
}
