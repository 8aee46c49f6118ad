// src/models/question.rs

use serde::{Deserialize, Serialize};

/// The authoritative definition of one quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalQuestion {
    pub id: String,

    pub question_text: String,

    /// Question type, e.g. 'single' or 'multiple'. Carried through untouched.
    #[serde(rename = "type")]
    pub question_type: String,

    /// Every selectable label, in presentation order.
    pub available_answers: Vec<String>,
}

/// A quiz as held by the question-set store. Contains no correct answers,
/// so it is safe to hand to clients as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDefinition {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub questions: Vec<CanonicalQuestion>,
}
