// src/validation.rs

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::{
    error::AppError,
    models::submission::{
        Participant, SubmittedQuestion, SubmittedQuestionPayload, Submission, SubmissionPayload,
    },
};

/// Checks a raw payload against the submission schema and, on success,
/// returns the typed `Submission`.
///
/// The constraints themselves live declaratively on `SubmissionPayload`;
/// this function only runs them and reshapes the data.
pub fn validate_submission(payload: SubmissionPayload) -> Result<Submission, AppError> {
    if let Err(validation_errors) = payload.validate() {
        let message = describe(&validation_errors);
        tracing::warn!("Rejected submission: {}", message);
        return Err(AppError::BadRequest(message));
    }

    // The checks above guarantee every required field is present.
    let (Some(quiz_id), Some(participant), Some(questions)) =
        (payload.quiz_id, payload.participant, payload.questions)
    else {
        return Err(AppError::BadRequest(
            "quizId, participant and questions are required".to_string(),
        ));
    };
    let (Some(uid), Some(display_name)) = (participant.uid, participant.display_name) else {
        return Err(AppError::BadRequest(
            "participant.uid and participant.displayName are required".to_string(),
        ));
    };

    Ok(Submission {
        quiz_id,
        participant: Participant { uid, display_name },
        questions: questions.into_iter().filter_map(into_submitted).collect(),
    })
}

/// Flattens nested validator errors into one line of constraint messages,
/// sorted so the text is stable across runs.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.sort();
    messages.dedup();
    messages.join("; ")
}

fn collect_messages(errors: &ValidationErrors, messages: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                messages.extend(field_errors.iter().map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({})", field, error.code),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, messages);
                }
            }
        }
    }
}

fn into_submitted(question: SubmittedQuestionPayload) -> Option<SubmittedQuestion> {
    question
        .question_id
        .map(|id| SubmittedQuestion::new(id, question.selected_answers))
}
