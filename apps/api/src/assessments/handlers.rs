use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessments::{Assessment, NewAssessment, PlatformMetrics};
use crate::errors::AppError;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::matching::QuizAnswer;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssessmentRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub answers: Vec<QuizAnswer>,
    pub top_career: String,
    pub match_score: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssessmentResponse {
    pub success: bool,
    pub assessment_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub user_id: String,
    pub career_title: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// POST /api/save-assessment
pub async fn handle_save_assessment(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SaveAssessmentRequest>,
) -> Result<Json<SaveAssessmentResponse>, AppError> {
    if req.top_career.trim().is_empty() {
        return Err(AppError::Validation("topCareer cannot be empty".to_string()));
    }
    if req.match_score < 0 {
        return Err(AppError::Validation(
            "matchScore cannot be negative".to_string(),
        ));
    }

    let assessment = state
        .store
        .create_assessment(NewAssessment {
            user_id: req.user_id.filter(|id| !id.trim().is_empty()),
            answers: req.answers,
            top_career: req.top_career,
            match_score: req.match_score,
        })
        .await?;

    Ok(Json(SaveAssessmentResponse {
        success: true,
        assessment_id: assessment.id,
    }))
}

/// GET /api/user-assessment?userId=
///
/// Returns the user's most recent assessment.
pub async fn handle_user_assessment(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Assessment>, AppError> {
    let user_id = require_user_id(params)?;

    state
        .store
        .assessments_by_user(&user_id)
        .await?
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No assessment found".to_string()))
}

/// GET /api/assessment-history?userId=
///
/// Every assessment for the user, newest first. Empty when there are none.
pub async fn handle_assessment_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Assessment>>, AppError> {
    let user_id = require_user_id(params)?;
    Ok(Json(state.store.assessments_by_user(&user_id).await?))
}

/// GET /api/assessments/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<Assessment>, AppError> {
    state
        .store
        .get_assessment(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))
}

/// POST /api/track-career-exploration
pub async fn handle_track_career_exploration(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TrackRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let (user_id, career_title) = require_track_fields(&req)?;
    state
        .store
        .track_career_exploration(user_id, career_title)
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/track-ar-preview
pub async fn handle_track_ar_preview(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TrackRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let (user_id, career_title) = require_track_fields(&req)?;
    state.store.track_ar_preview(user_id, career_title).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/platform-metrics
pub async fn handle_platform_metrics(
    State(state): State<AppState>,
) -> Result<Json<PlatformMetrics>, AppError> {
    Ok(Json(state.store.platform_metrics().await?))
}

fn require_user_id(params: UserIdQuery) -> Result<String, AppError> {
    params
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing userId parameter".to_string()))
}

fn require_track_fields(req: &TrackRequest) -> Result<(&str, &str), AppError> {
    let user_id = req.user_id.trim();
    let career_title = req.career_title.trim();
    if user_id.is_empty() || career_title.is_empty() {
        return Err(AppError::Validation(
            "Missing userId or careerTitle".to_string(),
        ));
    }
    Ok((user_id, career_title))
}
