use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::catalog::{Career, QuizQuestion};
use crate::errors::AppError;
use crate::extract::ValidatedPath;
use crate::state::AppState;

#[derive(Serialize)]
pub struct QuizResponse<'c> {
    pub version: &'c str,
    pub questions: &'c [QuizQuestion],
}

/// GET /api/quiz
pub async fn handle_get_quiz(State(state): State<AppState>) -> Response {
    Json(QuizResponse {
        version: state.catalog.version(),
        questions: state.catalog.questions(),
    })
    .into_response()
}

/// GET /api/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Response {
    Json(state.catalog.careers()).into_response()
}

/// GET /api/careers/:id
pub async fn handle_get_career(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<String>,
) -> Result<Json<Career>, AppError> {
    state
        .catalog
        .career_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Career {id} not found")))
}
