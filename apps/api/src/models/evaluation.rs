use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One appended session evaluation, as stored. `question_ratings` is the
/// serialized `Vec<QuestionRatings>` batch; `verdict` is the display label.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionEvaluationRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub candidate_name: String,
    pub question_ratings: Value,
    pub average_score: f64,
    pub verdict: String,
    pub created_at: DateTime<Utc>,
}
