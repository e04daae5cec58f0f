//! Axum route handlers for the Match API.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::matching::validation::validate_answers;
use crate::matching::{CareerMatchResult, QuizAnswer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse<'c> {
    pub top_matches: Vec<CareerMatchResult<'c>>,
}

/// POST /api/match
///
/// Validates the answer set against the catalog, ranks every career, and
/// returns the top `TOP_MATCHES` (default 5).
pub async fn handle_match(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MatchRequest>,
) -> Result<Response, AppError> {
    validate_answers(&state.catalog, &request.answers)?;

    let mut ranked = state.matcher.rank(&state.catalog, &request.answers);
    ranked.truncate(state.config.top_matches);

    debug!(
        "Matched {} answers with {} backend; top: {:?}",
        request.answers.len(),
        state.matcher.backend(),
        ranked.first().map(|m| (&m.career.title, m.match_score))
    );

    Ok(Json(MatchResponse {
        top_matches: ranked,
    })
    .into_response())
}
