use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    evaluation::Evaluator,
    resolver::AnswerKeyResolver,
    store::{
        AnswerKeyStore, ParticipantCounter, ParticipantRoster, ParticipationSink,
        QuizDefinitionStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quizzes: Arc<dyn QuizDefinitionStore>,
    pub answers: Arc<dyn AnswerKeyStore>,
    pub participations: Arc<dyn ParticipationSink>,
    pub counter: Arc<dyn ParticipantCounter>,
    pub roster: Arc<dyn ParticipantRoster>,
    pub config: Config,
}

impl AppState {
    /// Wires every collaborator to the same backing store.
    pub fn new<S>(store: Arc<S>, config: Config) -> Self
    where
        S: QuizDefinitionStore
            + AnswerKeyStore
            + ParticipationSink
            + ParticipantCounter
            + ParticipantRoster
            + 'static,
    {
        Self {
            quizzes: store.clone(),
            answers: store.clone(),
            participations: store.clone(),
            counter: store.clone(),
            roster: store,
            config,
        }
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(AnswerKeyResolver::new(
            self.quizzes.clone(),
            self.answers.clone(),
        ))
    }
}

impl FromRef<AppState> for Arc<dyn QuizDefinitionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.quizzes.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ParticipantRoster> {
    fn from_ref(state: &AppState) -> Self {
        state.roster.clone()
    }
}
