pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessments::handlers as assessments;
use crate::catalog::handlers as catalog;
use crate::insights::handlers as insights;
use crate::matching::handlers as matching;
use crate::report::handlers as report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/quiz", get(catalog::handle_get_quiz))
        .route("/api/careers", get(catalog::handle_list_careers))
        .route("/api/careers/:id", get(catalog::handle_get_career))
        // Matching
        .route("/api/match", post(matching::handle_match))
        // Assessments and tracking
        .route(
            "/api/save-assessment",
            post(assessments::handle_save_assessment),
        )
        .route(
            "/api/user-assessment",
            get(assessments::handle_user_assessment),
        )
        .route(
            "/api/assessment-history",
            get(assessments::handle_assessment_history),
        )
        .route("/api/assessments/:id", get(assessments::handle_get_assessment))
        .route(
            "/api/track-career-exploration",
            post(assessments::handle_track_career_exploration),
        )
        .route(
            "/api/track-ar-preview",
            post(assessments::handle_track_ar_preview),
        )
        .route(
            "/api/platform-metrics",
            get(assessments::handle_platform_metrics),
        )
        // Enrichment
        .route(
            "/api/careers-realtime",
            get(insights::handle_realtime_careers),
        )
        .route(
            "/api/career-metrics/:career_name",
            get(insights::handle_career_metrics),
        )
        .route("/api/insights", post(insights::handle_career_insights))
        .route("/api/report", post(report::handle_report))
        .with_state(state)
}
