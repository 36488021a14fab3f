use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::engine::{spawn_session, EngineDeps, SessionHandle};
use crate::interview::generator::build_question_bank;
use crate::interview::session::{Session, SessionSnapshot};
use crate::state::AppState;

/// The intake triple produced by the résumé-ingestion collaborator.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub candidate_name: String,
    pub job_description: String,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ActivityRequest {
    pub draft: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    if req.resume_text.trim().is_empty() || req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "No resume data found. Upload a resume and job description before starting an interview."
                .to_string(),
        ));
    }

    let candidate_name = if req.candidate_name.trim().is_empty() {
        "Candidate".to_string()
    } else {
        req.candidate_name.trim().to_string()
    };

    let questions = build_question_bank(
        state.model.as_ref(),
        &req.resume_text,
        &req.job_description,
        state.config.question_count,
    )
    .await;
    info!(
        "Generated {} question(s) for candidate '{}'",
        questions.len(),
        candidate_name
    );

    let session_id = Uuid::new_v4();
    let session = Session::new(
        session_id,
        candidate_name,
        req.job_description,
        req.resume_text,
        questions,
        Duration::from_secs(state.config.interview_minutes * 60),
    );

    let handle = spawn_session(
        session,
        EngineDeps {
            model: state.model.clone(),
            history: state.history.clone(),
        },
    );
    let snapshot = handle.snapshot().await?;
    state.sessions.insert(session_id, handle);

    Ok(Json(CreateSessionResponse {
        session_id,
        snapshot,
    }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = lookup(&state, id)?;
    Ok(Json(handle.snapshot().await?))
}

/// POST /api/v1/sessions/:id/answer
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = lookup(&state, id)?;
    Ok(Json(handle.submit_answer(req.text).await?))
}

/// POST /api/v1/sessions/:id/activity
///
/// Keystrokes and live speech-recognition transcripts both land here; the
/// engine resets the inactivity timers and remembers the draft.
pub async fn handle_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ActivityRequest>,
) -> Result<StatusCode, AppError> {
    let handle = lookup(&state, id)?;
    handle.activity(req.draft).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/utterance-ended
pub async fn handle_utterance_ended(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let handle = lookup(&state, id)?;
    handle.utterance_ended().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/end
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = lookup(&state, id)?;
    Ok(Json(handle.end().await?))
}

fn lookup(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}
