use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::assessments::{
    Assessment, AssessmentStore, ExplorationKind, NewAssessment, PlatformMetrics,
};
use crate::errors::AppError;
use crate::matching::QuizAnswer;

#[derive(Debug, FromRow)]
struct AssessmentRow {
    id: Uuid,
    user_id: Option<String>,
    answers: Json<Vec<QuizAnswer>>,
    top_career: String,
    match_score: i32,
    created_at: DateTime<Utc>,
}

impl From<AssessmentRow> for Assessment {
    fn from(row: AssessmentRow) -> Self {
        Assessment {
            id: row.id,
            user_id: row.user_id,
            answers: row.answers.0,
            top_career: row.top_career,
            match_score: row.match_score,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed store. Schema lives in `migrations/`.
pub struct PgAssessmentStore {
    pool: PgPool,
}

impl PgAssessmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentStore for PgAssessmentStore {
    async fn create_assessment(&self, new: NewAssessment) -> Result<Assessment, AppError> {
        let row = sqlx::query_as::<_, AssessmentRow>(
            r#"
            INSERT INTO assessments (id, user_id, answers, top_career, match_score)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, answers, top_career, match_score, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.user_id)
        .bind(Json(&new.answers))
        .bind(&new.top_career)
        .bind(new.match_score)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Stored assessment {} (top career: {}, score: {})",
            row.id, row.top_career, row.match_score
        );
        Ok(row.into())
    }

    async fn get_assessment(&self, id: Uuid) -> Result<Option<Assessment>, AppError> {
        let row = sqlx::query_as::<_, AssessmentRow>(
            "SELECT id, user_id, answers, top_career, match_score, created_at \
             FROM assessments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Assessment::from))
    }

    async fn assessments_by_user(&self, user_id: &str) -> Result<Vec<Assessment>, AppError> {
        let rows = sqlx::query_as::<_, AssessmentRow>(
            r#"
            SELECT id, user_id, answers, top_career, match_score, created_at
            FROM assessments
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Assessment::from).collect())
    }

    async fn record_exploration(
        &self,
        user_id: &str,
        career_title: &str,
        kind: ExplorationKind,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO career_explorations (id, user_id, career_title, kind) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(career_title)
        .bind(kind.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn platform_metrics(&self) -> Result<PlatformMetrics, AppError> {
        let (students_helped, careers_explored, ar_previews_completed, average_match_score): (
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM assessments),
                (SELECT COUNT(DISTINCT career_title) FROM career_explorations
                    WHERE kind = 'career_exploration'),
                (SELECT COUNT(*) FROM career_explorations WHERE kind = 'ar_preview'),
                (SELECT COALESCE(ROUND(AVG(match_score)), 0)::BIGINT FROM assessments)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PlatformMetrics {
            students_helped,
            careers_explored,
            ar_previews_completed,
            average_match_score,
            last_updated: Utc::now(),
        })
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
