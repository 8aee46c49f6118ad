// src/store/memory.rs

use std::{
    collections::HashMap,
    path::Path,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

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

/// Process-local store. Used when no database is configured and by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    quizzes: HashMap<String, QuizRecord>,
    answers: HashMap<String, Vec<AnswerKeyEntry>>,
    participations: Vec<Participation>,
}

#[derive(Debug)]
struct QuizRecord {
    definition: QuizDefinition,
    participants_count: u64,
    participants: Vec<ParticipantEntry>,
}

/// A stored participation record.
#[derive(Debug, Clone, PartialEq)]
pub struct Participation {
    pub result: EvaluationResult,
    pub participated_at: DateTime<Utc>,
}

/// Seed file layout: `{ "quizzes": [ { id, title, questions, answers } ] }`.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub quizzes: Vec<SeedQuiz>,
}

#[derive(Debug, Deserialize)]
pub struct SeedQuiz {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub questions: Vec<CanonicalQuestion>,
    /// Omitted answers leave the quiz without an answer key.
    pub answers: Option<Vec<AnswerKeyEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedFile) -> Result<Self, AppError> {
        let store = Self::new();
        for quiz in seed.quizzes {
            store.insert_quiz(QuizDefinition {
                id: quiz.id.clone(),
                title: quiz.title,
                questions: quiz.questions,
            })?;
            if let Some(answers) = quiz.answers {
                store.insert_answer_key(&quiz.id, answers)?;
            }
        }
        Ok(store)
    }

    pub fn load_seed_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let seed: SeedFile = serde_json::from_str(&raw)?;
        tracing::info!("Seeding {} quizzes from {}", seed.quizzes.len(), path.display());
        Self::from_seed(seed)
    }

    /// Inserts or replaces a quiz. Replacing keeps its participants.
    pub fn insert_quiz(&self, definition: QuizDefinition) -> Result<(), AppError> {
        let mut inner = self.write()?;
        match inner.quizzes.get_mut(&definition.id) {
            Some(record) => record.definition = definition,
            None => {
                inner.quizzes.insert(
                    definition.id.clone(),
                    QuizRecord {
                        definition,
                        participants_count: 0,
                        participants: Vec::new(),
                    },
                );
            }
        }
        Ok(())
    }

    pub fn insert_answer_key(
        &self,
        quiz_id: &str,
        answers: Vec<AnswerKeyEntry>,
    ) -> Result<(), AppError> {
        self.write()?.answers.insert(quiz_id.to_string(), answers);
        Ok(())
    }

    pub fn participants_count(&self, quiz_id: &str) -> Result<Option<u64>, AppError> {
        Ok(self
            .read()?
            .quizzes
            .get(quiz_id)
            .map(|record| record.participants_count))
    }

    pub fn participations(&self) -> Result<Vec<Participation>, AppError> {
        Ok(self.read()?.participations.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, AppError> {
        self.inner
            .read()
            .map_err(|e| AppError::InternalServerError(format!("memory store poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, AppError> {
        self.inner
            .write()
            .map_err(|e| AppError::InternalServerError(format!("memory store poisoned: {}", e)))
    }
}

#[async_trait]
impl QuizDefinitionStore for MemoryStore {
    async fn get(&self, quiz_id: &str) -> Result<Option<QuizDefinition>, AppError> {
        Ok(self
            .read()?
            .quizzes
            .get(quiz_id)
            .map(|record| record.definition.clone()))
    }
}

#[async_trait]
impl AnswerKeyStore for MemoryStore {
    async fn get(&self, quiz_id: &str) -> Result<Option<Vec<AnswerKeyEntry>>, AppError> {
        Ok(self.read()?.answers.get(quiz_id).cloned())
    }
}

#[async_trait]
impl ParticipationSink for MemoryStore {
    async fn record(&self, result: &EvaluationResult) -> Result<(), AppError> {
        let participated_at = Utc::now();
        let mut inner = self.write()?;

        let record = inner.quizzes.get_mut(&result.quiz_id).ok_or_else(|| {
            AppError::InternalServerError(format!(
                "cannot record participant, no quiz {}",
                result.quiz_id
            ))
        })?;
        record.participants.push(ParticipantEntry {
            uid: result.participant.uid.clone(),
            display_name: result.participant.display_name.clone(),
            score: result.score_sum,
            participated_at,
        });

        inner.participations.push(Participation {
            result: result.clone(),
            participated_at,
        });
        Ok(())
    }
}

#[async_trait]
impl ParticipantCounter for MemoryStore {
    async fn increment(&self, quiz_id: &str) -> Result<(), AppError> {
        let mut inner = self.write()?;
        let record = inner.quizzes.get_mut(quiz_id).ok_or_else(|| {
            AppError::InternalServerError(format!("cannot count participant, no quiz {}", quiz_id))
        })?;
        record.participants_count += 1;
        Ok(())
    }
}

#[async_trait]
impl ParticipantRoster for MemoryStore {
    async fn top(&self, quiz_id: &str, limit: i64) -> Result<Vec<ParticipantEntry>, AppError> {
        let inner = self.read()?;
        let Some(record) = inner.quizzes.get(quiz_id) else {
            return Ok(Vec::new());
        };

        let mut entries = record.participants.clone();
        entries.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.participated_at.cmp(&b.participated_at))
        });
        entries.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{evaluation::QuestionEvaluated, submission::Participant};

    fn quiz(id: &str) -> QuizDefinition {
        QuizDefinition {
            id: id.to_string(),
            title: "Rust basics".to_string(),
            questions: vec![CanonicalQuestion {
                id: "q1".to_string(),
                question_text: "Pick the borrow checker's friends".to_string(),
                question_type: "multiple".to_string(),
                available_answers: vec!["A".to_string(), "B".to_string()],
            }],
        }
    }

    fn result(quiz_id: &str, uid: &str, score_sum: f64) -> EvaluationResult {
        EvaluationResult {
            quiz_id: quiz_id.to_string(),
            score_sum,
            participant: Participant {
                uid: uid.to_string(),
                display_name: format!("User {}", uid),
            },
            questions_evaluated: Vec::<QuestionEvaluated>::new(),
        }
    }

    #[tokio::test]
    async fn lookups_return_none_for_unknown_quiz() {
        let store = MemoryStore::new();
        assert!(QuizDefinitionStore::get(&store, "missing-quiz").await.unwrap().is_none());
        assert!(AnswerKeyStore::get(&store, "missing-quiz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seeded_quiz_and_answers_are_served() {
        let seed: SeedFile = serde_json::from_value(serde_json::json!({
            "quizzes": [{
                "id": "quiz-000001",
                "title": "Rust basics",
                "questions": [{
                    "id": "q1",
                    "questionText": "Which are traits?",
                    "type": "multiple",
                    "availableAnswers": ["Clone", "Vec", "Debug"]
                }],
                "answers": [{ "questionId": "q1", "correctAnswers": ["Clone", "Debug"] }]
            }]
        }))
        .unwrap();
        let store = MemoryStore::from_seed(seed).unwrap();

        let definition = QuizDefinitionStore::get(&store, "quiz-000001").await.unwrap().unwrap();
        assert_eq!(definition.title, "Rust basics");
        assert_eq!(definition.questions[0].available_answers.len(), 3);

        let answers = AnswerKeyStore::get(&store, "quiz-000001").await.unwrap().unwrap();
        assert!(answers[0].correct_answers.contains("Debug"));
    }

    #[tokio::test]
    async fn bundled_seed_file_loads() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/seed/quizzes.json"));
        let store = MemoryStore::load_seed_file(path).unwrap();
        assert!(QuizDefinitionStore::get(&store, "rust-basics-001").await.unwrap().is_some());
        assert_eq!(store.participants_count("rust-basics-001").unwrap(), Some(0));
    }

    #[tokio::test]
    async fn record_and_increment_update_roster_and_count() {
        let store = MemoryStore::new();
        store.insert_quiz(quiz("quiz-000001")).unwrap();

        store.record(&result("quiz-000001", "u1", 0.5)).await.unwrap();
        store.increment("quiz-000001").await.unwrap();
        store.record(&result("quiz-000001", "u2", 2.0)).await.unwrap();
        store.increment("quiz-000001").await.unwrap();

        assert_eq!(store.participants_count("quiz-000001").unwrap(), Some(2));
        assert_eq!(store.participations().unwrap().len(), 2);

        let top = store.top("quiz-000001", 10).await.unwrap();
        let uids: Vec<&str> = top.iter().map(|e| e.uid.as_str()).collect();
        assert_eq!(uids, vec!["u2", "u1"]);

        assert_eq!(store.top("quiz-000001", 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn increment_on_unknown_quiz_fails() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.increment("missing-quiz").await,
            Err(AppError::InternalServerError(_))
        ));
    }

    #[tokio::test]
    async fn record_on_unknown_quiz_writes_nothing() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.record(&result("missing-quiz", "u1", 1.0)).await,
            Err(AppError::InternalServerError(_))
        ));
        assert!(store.participations().unwrap().is_empty());
    }

    #[tokio::test]
    async fn replacing_a_quiz_keeps_its_count() {
        let store = MemoryStore::new();
        store.insert_quiz(quiz("quiz-000001")).unwrap();
        store.increment("quiz-000001").await.unwrap();
        store.insert_quiz(quiz("quiz-000001")).unwrap();
        assert_eq!(store.participants_count("quiz-000001").unwrap(), Some(1));
    }
}
