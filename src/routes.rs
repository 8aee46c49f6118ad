// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers::quiz, state::AppState};

/// Assembles the main application router.
///
/// * Mounts the quiz routes under `/api/quiz`.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (stores and config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route(
            "/evaluate",
            post(quiz::evaluate_quiz).fallback(quiz::reject_method),
        )
        .route("/{quiz_id}", get(quiz::get_quiz))
        .route("/{quiz_id}/participants", get(quiz::list_participants));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
