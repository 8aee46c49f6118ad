// src/store/mod.rs

//! Collaborators the evaluator reads from and writes to.
//!
//! Reads (`QuizDefinitionStore`, `AnswerKeyStore`) feed scoring. Writes
//! (`ParticipationSink`, `ParticipantCounter`) happen only after a result
//! has been assembled.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        answer_key::AnswerKeyEntry, evaluation::EvaluationResult, participation::ParticipantEntry,
        question::QuizDefinition,
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Question-set documents, keyed by quiz id.
#[async_trait]
pub trait QuizDefinitionStore: Send + Sync {
    /// `Ok(None)` when no quiz exists under `quiz_id`.
    async fn get(&self, quiz_id: &str) -> Result<Option<QuizDefinition>, AppError>;
}

/// Answer-key documents, keyed by quiz id.
#[async_trait]
pub trait AnswerKeyStore: Send + Sync {
    /// `Ok(None)` when no answer key exists under `quiz_id`.
    async fn get(&self, quiz_id: &str) -> Result<Option<Vec<AnswerKeyEntry>>, AppError>;
}

/// Persists the outcome of an evaluated submission together with a roster
/// entry for the quiz.
#[async_trait]
pub trait ParticipationSink: Send + Sync {
    async fn record(&self, result: &EvaluationResult) -> Result<(), AppError>;
}

#[async_trait]
pub trait ParticipantCounter: Send + Sync {
    async fn increment(&self, quiz_id: &str) -> Result<(), AppError>;
}

/// Read side of the roster written by `ParticipationSink`.
#[async_trait]
pub trait ParticipantRoster: Send + Sync {
    /// Highest scores first, earliest attempt breaking ties.
    async fn top(&self, quiz_id: &str, limit: i64) -> Result<Vec<ParticipantEntry>, AppError>;
}
