// tests/collaborator_tests.rs

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use quiz_evaluator::{
    config::Config,
    error::AppError,
    models::{
        answer_key::AnswerKeyEntry,
        evaluation::EvaluationResult,
        participation::ParticipantEntry,
        question::{CanonicalQuestion, QuizDefinition},
    },
    routes,
    state::AppState,
    store::{
        AnswerKeyStore, MemoryStore, ParticipantCounter, ParticipantRoster, ParticipationSink,
        QuizDefinitionStore,
    },
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Wraps a `MemoryStore` and counts every call that reaches it.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_writes: bool,
}

impl CountingStore {
    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuizDefinitionStore for CountingStore {
    async fn get(&self, quiz_id: &str) -> Result<Option<QuizDefinition>, AppError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        QuizDefinitionStore::get(&self.inner, quiz_id).await
    }
}

#[async_trait]
impl AnswerKeyStore for CountingStore {
    async fn get(&self, quiz_id: &str) -> Result<Option<Vec<AnswerKeyEntry>>, AppError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        AnswerKeyStore::get(&self.inner, quiz_id).await
    }
}

#[async_trait]
impl ParticipationSink for CountingStore {
    async fn record(&self, result: &EvaluationResult) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(AppError::InternalServerError("disk full".to_string()));
        }
        self.inner.record(result).await
    }
}

#[async_trait]
impl ParticipantCounter for CountingStore {
    async fn increment(&self, quiz_id: &str) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.increment(quiz_id).await
    }
}

#[async_trait]
impl ParticipantRoster for CountingStore {
    async fn top(&self, quiz_id: &str, limit: i64) -> Result<Vec<ParticipantEntry>, AppError> {
        self.inner.top(quiz_id, limit).await
    }
}

const QUIZ_ID: &str = "quiz-counting-01";

fn store(fail_writes: bool) -> Arc<CountingStore> {
    let store = CountingStore {
        fail_writes,
        ..CountingStore::default()
    };
    store
        .inner
        .insert_quiz(QuizDefinition {
            id: QUIZ_ID.to_string(),
            title: "Counting".to_string(),
            questions: vec![CanonicalQuestion {
                id: "q1".to_string(),
                question_text: "Pick the evens".to_string(),
                question_type: "multiple".to_string(),
                available_answers: ["1", "2", "3", "4"].map(String::from).to_vec(),
            }],
        })
        .unwrap();
    store
        .inner
        .insert_answer_key(QUIZ_ID, vec![AnswerKeyEntry::new("q1", ["2", "4"])])
        .unwrap();
    Arc::new(store)
}

async fn post_evaluate(store: Arc<CountingStore>, body: Value) -> (StatusCode, Value) {
    let app = routes::create_router(AppState::new(store, Config::default()));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/quiz/evaluate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn body(quiz_id: &str, selected: &[&str]) -> Value {
    json!({
        "quizId": quiz_id,
        "participant": { "uid": "user-7", "displayName": "Grace" },
        "questions": [{ "questionId": "q1", "selectedAnswers": selected }]
    })
}

#[tokio::test]
async fn validation_failure_makes_no_collaborator_calls() {
    let store = store(false);

    let (status, json) = post_evaluate(store.clone(), body("short", &["2"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(store.reads(), 0);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn missing_participant_fields_make_no_collaborator_calls() {
    let store = store(false);

    let (status, _) = post_evaluate(
        store.clone(),
        json!({
            "quizId": QUIZ_ID,
            "participant": { "uid": "" },
            "questions": [{ "questionId": "q1", "selectedAnswers": ["2"] }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.reads(), 0);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn successful_evaluation_reads_both_documents_then_writes_twice() {
    let store = store(false);

    let (status, json) = post_evaluate(store.clone(), body(QUIZ_ID, &["2", "3"])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["scoreSum"], 0.5);
    assert_eq!(store.reads(), 2);
    assert_eq!(store.writes(), 2);
    assert_eq!(store.inner.participants_count(QUIZ_ID).unwrap(), Some(1));
}

#[tokio::test]
async fn unknown_quiz_makes_no_writes() {
    let store = store(false);

    let (status, json) = post_evaluate(store.clone(), body("quiz-unknown-99", &["2"])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Quiz not found. QuizId: quiz-unknown-99");
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn failed_write_hides_detail_from_caller() {
    let store = store(true);

    let (status, json) = post_evaluate(store.clone(), body(QUIZ_ID, &["2", "4"])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Internal Server Error");
}
