use axum::{extract::State, Json};
use serde::Deserialize;

use crate::catalog::Career;
use crate::errors::AppError;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::insights::{
    fetch_career_metrics, fetch_realtime_careers, generate_career_insights, CareerInsight,
    CareerMetrics,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    pub career_id: String,
    pub match_score: u32,
}

/// GET /api/careers-realtime
pub async fn handle_realtime_careers(State(state): State<AppState>) -> Json<Vec<Career>> {
    Json(fetch_realtime_careers(state.llm.as_ref(), &state.cache, &state.catalog).await)
}

/// GET /api/career-metrics/:careerName
///
/// Path segments arrive percent-decoded.
pub async fn handle_career_metrics(
    State(state): State<AppState>,
    ValidatedPath(career_name): ValidatedPath<String>,
) -> Result<Json<CareerMetrics>, AppError> {
    fetch_career_metrics(
        state.llm.as_ref(),
        &state.cache,
        &state.catalog,
        &career_name,
    )
    .await
    .map(Json)
}

/// POST /api/insights
pub async fn handle_career_insights(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<InsightRequest>,
) -> Result<Json<CareerInsight>, AppError> {
    let career = state
        .catalog
        .career_by_id(&req.career_id)
        .ok_or_else(|| AppError::NotFound(format!("Career {} not found", req.career_id)))?;

    Ok(Json(
        generate_career_insights(state.llm.as_ref(), career, req.match_score).await,
    ))
}
