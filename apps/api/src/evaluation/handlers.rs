use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::rating::{
    evaluate_session, rate_answer, PanelistRating, SessionEvaluation, TranscriptPair,
};
use crate::models::evaluation::SessionEvaluationRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RateAnswerRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct RateAnswerResponse {
    pub ratings: Vec<PanelistRating>,
}

/// POST /api/v1/ratings/answer
///
/// Rates one question/answer pair across the whole panel and appends the
/// batch to the history store.
pub async fn handle_rate_answer(
    State(state): State<AppState>,
    Json(req): Json<RateAnswerRequest>,
) -> Result<Json<RateAnswerResponse>, AppError> {
    if req.question.trim().is_empty() || req.answer.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing question or answer".to_string(),
        ));
    }

    let ratings = rate_answer(state.model.as_ref(), &req.question, &req.answer).await;
    state
        .history
        .append_answer_ratings(&req.question, &req.answer, &ratings)
        .await?;

    Ok(Json(RateAnswerResponse { ratings }))
}

#[derive(Debug, Deserialize)]
pub struct RateSessionRequest {
    pub candidate_name: Option<String>,
    pub answers: Vec<TranscriptPair>,
}

/// POST /api/v1/ratings/session
///
/// Rates a caller-supplied transcript and appends the evaluation. The live
/// engine does this automatically on completion; this endpoint covers
/// transcripts assembled elsewhere.
pub async fn handle_rate_session(
    State(state): State<AppState>,
    Json(req): Json<RateSessionRequest>,
) -> Result<Json<SessionEvaluation>, AppError> {
    if req.answers.is_empty() {
        return Err(AppError::Validation("No answers provided".to_string()));
    }

    let evaluation = evaluate_session(state.model.as_ref(), &req.answers).await;
    let candidate_name = req.candidate_name.unwrap_or_else(|| "Candidate".to_string());
    state
        .history
        .append_session(Uuid::new_v4(), &candidate_name, &evaluation)
        .await?;

    Ok(Json(evaluation))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/evaluations
pub async fn handle_list_evaluations(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<SessionEvaluationRow>>, AppError> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    Ok(Json(state.history.recent_sessions(limit).await?))
}
