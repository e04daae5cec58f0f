// Assessment persistence and exploration tracking.
// All storage goes through the AssessmentStore trait: Postgres when DATABASE_URL
// is configured, an in-process store otherwise.

pub mod handlers;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::QuizAnswer;

pub use memory::MemoryAssessmentStore;
pub use postgres::PgAssessmentStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub answers: Vec<QuizAnswer>,
    pub top_career: String,
    pub match_score: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub user_id: Option<String>,
    pub answers: Vec<QuizAnswer>,
    pub top_career: String,
    pub match_score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorationKind {
    CareerExploration,
    ArPreview,
}

impl ExplorationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplorationKind::CareerExploration => "career_exploration",
            ExplorationKind::ArPreview => "ar_preview",
        }
    }
}

/// Aggregate counters shown on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMetrics {
    pub students_helped: i64,
    /// Distinct career titles users have explored.
    pub careers_explored: i64,
    pub ar_previews_completed: i64,
    /// Rounded mean of stored match scores; 0 when nothing is stored.
    pub average_match_score: i64,
    pub last_updated: DateTime<Utc>,
}

/// Storage seam for assessments and exploration events.
///
/// Carried in `AppState` as `Arc<dyn AssessmentStore>`.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn create_assessment(&self, new: NewAssessment) -> Result<Assessment, AppError>;

    async fn get_assessment(&self, id: Uuid) -> Result<Option<Assessment>, AppError>;

    /// All assessments for a user, newest first.
    async fn assessments_by_user(&self, user_id: &str) -> Result<Vec<Assessment>, AppError>;

    async fn record_exploration(
        &self,
        user_id: &str,
        career_title: &str,
        kind: ExplorationKind,
    ) -> Result<(), AppError>;

    async fn platform_metrics(&self) -> Result<PlatformMetrics, AppError>;

    /// Backend label, for logs.
    fn backend(&self) -> &'static str;

    async fn track_career_exploration(
        &self,
        user_id: &str,
        career_title: &str,
    ) -> Result<(), AppError> {
        self.record_exploration(user_id, career_title, ExplorationKind::CareerExploration)
            .await
    }

    async fn track_ar_preview(&self, user_id: &str, career_title: &str) -> Result<(), AppError> {
        self.record_exploration(user_id, career_title, ExplorationKind::ArPreview)
            .await
    }
}

/// Rounded mean, matching how the landing page has always displayed it.
pub(crate) fn average_score(scores: impl IntoIterator<Item = i32>) -> i64 {
    let (sum, count) = scores
        .into_iter()
        .fold((0_i64, 0_i64), |(sum, count), s| (sum + i64::from(s), count + 1));
    if count == 0 {
        0
    } else {
        (sum as f64 / count as f64).round() as i64
    }
}
