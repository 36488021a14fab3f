pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers as evaluation_handlers;
use crate::interview::handlers as interview_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview sessions
        .route(
            "/api/v1/sessions",
            post(interview_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(interview_handlers::handle_get_session),
        )
        .route(
            "/api/v1/sessions/:id/answer",
            post(interview_handlers::handle_submit_answer),
        )
        .route(
            "/api/v1/sessions/:id/activity",
            post(interview_handlers::handle_activity),
        )
        .route(
            "/api/v1/sessions/:id/utterance-ended",
            post(interview_handlers::handle_utterance_ended),
        )
        .route(
            "/api/v1/sessions/:id/end",
            post(interview_handlers::handle_end_session),
        )
        // Panel ratings and history
        .route(
            "/api/v1/ratings/answer",
            post(evaluation_handlers::handle_rate_answer),
        )
        .route(
            "/api/v1/ratings/session",
            post(evaluation_handlers::handle_rate_session),
        )
        .route(
            "/api/v1/evaluations",
            get(evaluation_handlers::handle_list_evaluations),
        )
        .with_state(state)
}
