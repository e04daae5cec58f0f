use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::assessments::{
    average_score, Assessment, AssessmentStore, ExplorationKind, NewAssessment, PlatformMetrics,
};
use crate::errors::AppError;

/// Only what the metrics need; who explored what is not queried in memory.
#[derive(Debug, Clone)]
struct ExplorationEvent {
    career_title: String,
    kind: ExplorationKind,
}

#[derive(Default)]
struct Inner {
    assessments: Vec<Assessment>,
    events: Vec<ExplorationEvent>,
}

/// Process-local store used when no database is configured. Data is lost on restart.
#[derive(Default)]
pub struct MemoryAssessmentStore {
    inner: RwLock<Inner>,
}

impl MemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssessmentStore for MemoryAssessmentStore {
    async fn create_assessment(&self, new: NewAssessment) -> Result<Assessment, AppError> {
        let assessment = Assessment {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            answers: new.answers,
            top_career: new.top_career,
            match_score: new.match_score,
            created_at: Utc::now(),
        };
        self.inner.write().await.assessments.push(assessment.clone());
        Ok(assessment)
    }

    async fn get_assessment(&self, id: Uuid) -> Result<Option<Assessment>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.assessments.iter().find(|a| a.id == id).cloned())
    }

    async fn assessments_by_user(&self, user_id: &str) -> Result<Vec<Assessment>, AppError> {
        let inner = self.inner.read().await;
        // Insertion order is chronological; reverse for newest first.
        Ok(inner
            .assessments
            .iter()
            .rev()
            .filter(|a| a.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn record_exploration(
        &self,
        user_id: &str,
        career_title: &str,
        kind: ExplorationKind,
    ) -> Result<(), AppError> {
        debug!("Recorded {} for user {user_id}: {career_title}", kind.as_str());
        self.inner.write().await.events.push(ExplorationEvent {
            career_title: career_title.to_string(),
            kind,
        });
        Ok(())
    }

    async fn platform_metrics(&self) -> Result<PlatformMetrics, AppError> {
        let inner = self.inner.read().await;

        let careers_explored = inner
            .events
            .iter()
            .filter(|e| e.kind == ExplorationKind::CareerExploration)
            .map(|e| e.career_title.as_str())
            .collect::<HashSet<_>>()
            .len();
        let ar_previews_completed = inner
            .events
            .iter()
            .filter(|e| e.kind == ExplorationKind::ArPreview)
            .count();

        Ok(PlatformMetrics {
            students_helped: inner.assessments.len() as i64,
            careers_explored: careers_explored as i64,
            ar_previews_completed: ar_previews_completed as i64,
            average_match_score: average_score(inner.assessments.iter().map(|a| a.match_score)),
            last_updated: Utc::now(),
        })
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
