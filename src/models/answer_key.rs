// src/models/answer_key.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Correct labels for one question, stored apart from the question itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerKeyEntry {
    pub question_id: String,
    pub correct_answers: HashSet<String>,
}

impl AnswerKeyEntry {
    pub fn new<I, S>(question_id: impl Into<String>, correct: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: question_id.into(),
            correct_answers: correct.into_iter().map(Into::into).collect(),
        }
    }
}
