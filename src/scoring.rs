// src/scoring.rs

//! Grades a submission against the canonical questions and answer key.
//!
//! Pure and deterministic: no I/O, no shared state.

use std::collections::{HashMap, HashSet};

use crate::models::{
    answer_key::AnswerKeyEntry,
    evaluation::{EvaluatedOption, QuestionEvaluated},
    question::CanonicalQuestion,
    submission::SubmittedQuestion,
};

/// Per-question results in canonical order, plus their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub questions_evaluated: Vec<QuestionEvaluated>,
    pub score_sum: f64,
}

/// Scores every canonical question. The canonical list, not the submission,
/// decides which questions are scored and in what order.
pub fn score_quiz(
    questions: &[CanonicalQuestion],
    answer_key: &[AnswerKeyEntry],
    submitted: &[SubmittedQuestion],
) -> Scorecard {
    let correct_by_id = index_by_id(
        answer_key
            .iter()
            .map(|entry| (entry.question_id.as_str(), &entry.correct_answers)),
    );
    let selected_by_id = index_by_id(
        submitted
            .iter()
            .map(|question| (question.question_id.as_str(), &question.selected_answers)),
    );

    let mut score_sum = 0.0;
    let mut questions_evaluated = Vec::with_capacity(questions.len());

    for question in questions {
        let evaluated = score_question(
            question,
            correct_by_id.get(question.id.as_str()).copied(),
            selected_by_id.get(question.id.as_str()).copied(),
        );
        score_sum += evaluated.score;
        questions_evaluated.push(evaluated);
    }

    tracing::debug!(
        "Scored {} questions, score_sum: {}",
        questions_evaluated.len(),
        score_sum
    );

    Scorecard {
        questions_evaluated,
        score_sum,
    }
}

/// First entry wins when an id repeats.
fn index_by_id<'a>(
    entries: impl Iterator<Item = (&'a str, &'a HashSet<String>)>,
) -> HashMap<&'a str, &'a HashSet<String>> {
    let mut index = HashMap::new();
    for (id, labels) in entries {
        index.entry(id).or_insert(labels);
    }
    index
}

fn score_question(
    question: &CanonicalQuestion,
    correct: Option<&HashSet<String>>,
    selected: Option<&HashSet<String>>,
) -> QuestionEvaluated {
    let mut user_attempted = false;
    let mut required = 0;
    let mut hit = 0;

    let mut evaluated_options = Vec::with_capacity(question.available_answers.len());
    for label in &question.available_answers {
        let is_correct = correct.is_some_and(|set| set.contains(label));
        let is_selected = selected.is_some_and(|set| set.contains(label));

        if is_selected {
            user_attempted = true;
        }
        if is_correct {
            required += 1;
            if is_selected {
                hit += 1;
            }
        }

        evaluated_options.push(EvaluatedOption {
            label: label.clone(),
            user_checked: is_selected,
            correct: is_correct,
        });
    }

    let score = partial_credit(hit, required);
    tracing::debug!(
        "Question: {} n:{} s:{} score:{}",
        question.question_text,
        required,
        hit,
        score
    );

    QuestionEvaluated {
        id: question.id.clone(),
        question_text: question.question_text.clone(),
        question_type: question.question_type.clone(),
        user_attempted,
        score,
        evaluated_options,
    }
}

/// Fraction of the correct labels that were selected.
///
/// Extra incorrect selections are not penalized: checking every label
/// still scores 1. A question with no correct label scores 0.
pub fn partial_credit(hit: usize, required: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }
    hit as f64 / required as f64
}
