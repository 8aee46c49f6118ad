// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{participation::ParticipantListParams, submission::SubmissionPayload},
    state::AppState,
    store::{ParticipantRoster, QuizDefinitionStore},
};

/// Grades a submitted quiz attempt.
///
/// * Validates the payload and resolves the quiz's questions and answer key.
/// * Scores every question, with partial credit on multi-select questions.
/// * Records the participation and bumps the participant count, only once
///   scoring has succeeded.
pub async fn evaluate_quiz(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!("Unreadable submission: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    })?;

    let result = state.evaluator().evaluate(payload).await?;

    tokio::try_join!(
        state.participations.record(&result),
        state.counter.increment(&result.quiz_id),
    )?;

    tracing::info!(
        "Quiz {} evaluated for {}: score_sum {}",
        result.quiz_id,
        result.participant.uid,
        result.score_sum
    );

    Ok(Json(result))
}

/// The evaluate route only answers POST; anything else is a bad request.
pub async fn reject_method() -> StatusCode {
    StatusCode::BAD_REQUEST
}

/// Returns a quiz's questions. The answer key is stored separately and never included.
pub async fn get_quiz(
    State(quizzes): State<Arc<dyn QuizDefinitionStore>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes
        .get(&quiz_id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Quiz not found. QuizId: {}", quiz_id)))?;

    Ok(Json(quiz))
}

/// Lists a quiz's participants, best score first.
pub async fn list_participants(
    State(roster): State<Arc<dyn ParticipantRoster>>,
    Path(quiz_id): Path<String>,
    Query(params): Query<ParticipantListParams>,
) -> Result<impl IntoResponse, AppError> {
    let entries = roster.top(&quiz_id, params.effective_limit()).await?;
    Ok(Json(entries))
}
