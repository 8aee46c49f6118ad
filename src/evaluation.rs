// src/evaluation.rs

use crate::{
    error::AppError,
    models::{
        evaluation::EvaluationResult,
        submission::{Participant, SubmissionPayload},
    },
    resolver::AnswerKeyResolver,
    scoring::{self, Scorecard},
    validation,
};

/// Packages scored questions into the response structure.
pub fn assemble_result(
    quiz_id: String,
    participant: Participant,
    scorecard: Scorecard,
) -> EvaluationResult {
    EvaluationResult {
        quiz_id,
        score_sum: scorecard.score_sum,
        participant,
        questions_evaluated: scorecard.questions_evaluated,
    }
}

/// Runs `validate -> resolve -> score -> assemble`. The first failing stage
/// aborts the run; nothing is written here.
#[derive(Clone)]
pub struct Evaluator {
    resolver: AnswerKeyResolver,
}

impl Evaluator {
    pub fn new(resolver: AnswerKeyResolver) -> Self {
        Self { resolver }
    }

    pub async fn evaluate(&self, payload: SubmissionPayload) -> Result<EvaluationResult, AppError> {
        let submission = validation::validate_submission(payload)?;
        let resolved = self.resolver.resolve(&submission.quiz_id).await?;

        let scorecard = scoring::score_quiz(
            &resolved.questions,
            &resolved.answer_key,
            &submission.questions,
        );

        Ok(assemble_result(
            submission.quiz_id,
            submission.participant,
            scorecard,
        ))
    }
}
