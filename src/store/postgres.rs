// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::{
    error::AppError,
    models::{
        answer_key::AnswerKeyEntry,
        evaluation::EvaluationResult,
        participation::ParticipantEntry,
        question::{CanonicalQuestion, QuizDefinition},
    },
    store::{
        AnswerKeyStore, ParticipantCounter, ParticipantRoster, ParticipationSink,
        QuizDefinitionStore,
    },
};

/// Postgres-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Helper struct for fetching a quiz's question set.
#[derive(sqlx::FromRow)]
struct QuizRow {
    id: String,
    title: String,
    questions: Json<Vec<CanonicalQuestion>>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizDefinitionStore for PgStore {
    async fn get(&self, quiz_id: &str) -> Result<Option<QuizDefinition>, AppError> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, title, questions
            FROM quizzes
            WHERE id = $1
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch quiz {}: {:?}", quiz_id, e);
            AppError::from(e)
        })?;

        Ok(row.map(|row| QuizDefinition {
            id: row.id,
            title: row.title,
            questions: row.questions.0,
        }))
    }
}

#[async_trait]
impl AnswerKeyStore for PgStore {
    async fn get(&self, quiz_id: &str) -> Result<Option<Vec<AnswerKeyEntry>>, AppError> {
        let answers: Option<Json<Vec<AnswerKeyEntry>>> =
            sqlx::query_scalar("SELECT answers FROM quiz_answers WHERE quiz_id = $1")
                .bind(quiz_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch answer key for {}: {:?}", quiz_id, e);
                    AppError::from(e)
                })?;

        Ok(answers.map(|answers| answers.0))
    }
}

#[async_trait]
impl ParticipationSink for PgStore {
    async fn record(&self, result: &EvaluationResult) -> Result<(), AppError> {
        let document = serde_json::to_value(result)?;
        let mut tx = self.pool.begin().await?;

        let participation_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO participations (quiz_id, uid, display_name, score_sum, result)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&result.quiz_id)
        .bind(&result.participant.uid)
        .bind(&result.participant.display_name)
        .bind(result.score_sum)
        .bind(document)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert participation: {:?}", e);
            AppError::from(e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO quiz_participants (quiz_id, uid, display_name, score)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&result.quiz_id)
        .bind(&result.participant.uid)
        .bind(&result.participant.display_name)
        .bind(result.score_sum)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz participant: {:?}", e);
            AppError::from(e)
        })?;

        tx.commit().await?;

        tracing::debug!("New participation {} for quiz {}", participation_id, result.quiz_id);
        Ok(())
    }
}

#[async_trait]
impl ParticipantCounter for PgStore {
    async fn increment(&self, quiz_id: &str) -> Result<(), AppError> {
        let updated = sqlx::query(
            "UPDATE quizzes SET participants_count = participants_count + 1 WHERE id = $1",
        )
        .bind(quiz_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AppError::InternalServerError(format!(
                "cannot count participant, no quiz {}",
                quiz_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ParticipantRoster for PgStore {
    async fn top(&self, quiz_id: &str, limit: i64) -> Result<Vec<ParticipantEntry>, AppError> {
        let entries = sqlx::query_as::<_, ParticipantEntry>(
            r#"
            SELECT uid, display_name, score, participated_at
            FROM quiz_participants
            WHERE quiz_id = $1
            ORDER BY score DESC, participated_at ASC
            LIMIT $2
            "#,
        )
        .bind(quiz_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch participants for {}: {:?}", quiz_id, e);
            AppError::from(e)
        })?;

        Ok(entries)
    }
}
