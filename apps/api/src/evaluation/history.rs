//! Evaluation history — the durable, append-only record of ratings.
//!
//! Two collections, mirroring the two rating operations: per-answer rating
//! batches and whole-session evaluations. The application only ever INSERTs;
//! there are no update or delete paths.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::rating::{PanelistRating, SessionEvaluation};
use crate::models::evaluation::SessionEvaluationRow;

/// The history-store collaborator. `AppState` holds an
/// `Arc<dyn EvaluationHistory>`; tests swap in an in-memory fake.
#[async_trait]
pub trait EvaluationHistory: Send + Sync {
    /// Appends one rated question/answer pair.
    async fn append_answer_ratings(
        &self,
        question: &str,
        answer: &str,
        ratings: &[PanelistRating],
    ) -> Result<(), AppError>;

    /// Appends one finished session evaluation.
    async fn append_session(
        &self,
        session_id: Uuid,
        candidate_name: &str,
        evaluation: &SessionEvaluation,
    ) -> Result<(), AppError>;

    /// Most recent session evaluations, newest first.
    async fn recent_sessions(&self, limit: i64) -> Result<Vec<SessionEvaluationRow>, AppError>;
}

/// PostgreSQL-backed history store.
pub struct PgEvaluationHistory {
    pool: PgPool,
}

impl PgEvaluationHistory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EvaluationHistory for PgEvaluationHistory {
    async fn append_answer_ratings(
        &self,
        question: &str,
        answer: &str,
        ratings: &[PanelistRating],
    ) -> Result<(), AppError> {
        let ratings_value = serde_json::to_value(ratings)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize ratings: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO answer_ratings (id, question, answer, ratings)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(question)
        .bind(answer)
        .bind(&ratings_value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn append_session(
        &self,
        session_id: Uuid,
        candidate_name: &str,
        evaluation: &SessionEvaluation,
    ) -> Result<(), AppError> {
        let ratings_value = serde_json::to_value(&evaluation.question_ratings).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize session ratings: {e}"))
        })?;

        sqlx::query(
            r#"
            INSERT INTO session_evaluations
                (id, session_id, candidate_name, question_ratings, average_score, verdict)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session_id)
        .bind(candidate_name)
        .bind(&ratings_value)
        .bind(evaluation.average_score)
        .bind(evaluation.verdict.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn recent_sessions(&self, limit: i64) -> Result<Vec<SessionEvaluationRow>, AppError> {
        let rows: Vec<SessionEvaluationRow> = sqlx::query_as(
            "SELECT * FROM session_evaluations ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
