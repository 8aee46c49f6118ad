// src/models/submission.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw evaluation request as it arrives on the wire.
///
/// Every field is optional so that a missing value is reported by the
/// constraint set below instead of by the JSON decoder. Unknown keys are
/// rejected by the decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmissionPayload {
    #[validate(
        required(message = "quizId is required"),
        length(min = 10, message = "quizId length must be at least 10 characters long")
    )]
    pub quiz_id: Option<String>,

    #[validate(required(message = "participant is required"), nested)]
    pub participant: Option<ParticipantPayload>,

    #[validate(
        required(message = "questions is required"),
        length(min = 1, message = "questions must contain at least 1 item")
    )]
    pub questions: Option<Vec<SubmittedQuestionPayload>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParticipantPayload {
    #[validate(
        required(message = "participant.uid is required"),
        length(min = 1, message = "participant.uid is not allowed to be empty")
    )]
    pub uid: Option<String>,

    #[validate(
        required(message = "participant.displayName is required"),
        length(min = 1, message = "participant.displayName is not allowed to be empty")
    )]
    pub display_name: Option<String>,
}

/// One answered question. Items are not constrained beyond their JSON shape;
/// an item without a `questionId` simply never matches a quiz question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedQuestionPayload {
    #[serde(default)]
    pub question_id: Option<String>,
    #[serde(default)]
    pub selected_answers: Vec<String>,
}

/// The person taking the quiz, echoed back in the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub uid: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedQuestion {
    pub question_id: String,
    pub selected_answers: HashSet<String>,
}

/// A validated quiz attempt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub quiz_id: String,
    pub participant: Participant,
    pub questions: Vec<SubmittedQuestion>,
}

impl SubmittedQuestion {
    pub fn new<I, S>(question_id: impl Into<String>, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: question_id.into(),
            selected_answers: selected.into_iter().map(Into::into).collect(),
        }
    }
}
