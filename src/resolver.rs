// src/resolver.rs

use std::sync::Arc;

use crate::{
    error::AppError,
    models::{answer_key::AnswerKeyEntry, question::CanonicalQuestion},
    store::{AnswerKeyStore, QuizDefinitionStore},
};

/// Canonical data needed to grade one quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuiz {
    pub questions: Vec<CanonicalQuestion>,
    pub answer_key: Vec<AnswerKeyEntry>,
}

/// Read-only lookup of a quiz's questions and its answer key.
#[derive(Clone)]
pub struct AnswerKeyResolver {
    quizzes: Arc<dyn QuizDefinitionStore>,
    answers: Arc<dyn AnswerKeyStore>,
}

impl AnswerKeyResolver {
    pub fn new(quizzes: Arc<dyn QuizDefinitionStore>, answers: Arc<dyn AnswerKeyStore>) -> Self {
        Self { quizzes, answers }
    }

    /// Fetches both documents. Returns only once both lookups have finished,
    /// and fails with `NotFound` if either one is missing.
    pub async fn resolve(&self, quiz_id: &str) -> Result<ResolvedQuiz, AppError> {
        let (definition, answer_key) =
            tokio::join!(self.quizzes.get(quiz_id), self.answers.get(quiz_id));

        let definition = definition?.ok_or_else(|| {
            AppError::NotFound(format!("Quiz not found. QuizId: {}", quiz_id))
        })?;
        let answer_key = answer_key?.ok_or_else(|| {
            AppError::NotFound(format!("Quiz answers not found. QuizId: {}", quiz_id))
        })?;

        Ok(ResolvedQuiz {
            questions: definition.questions,
            answer_key,
        })
    }
}
