use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::matching::{CareerMatchResult, MatchBreakdown};
use crate::report::{render_career_report, report_file_name, DEFAULT_READER};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub career_id: String,
    pub match_score: u32,
    pub breakdown: MatchBreakdown,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// POST /api/report
///
/// Returns the report as `text/markdown` with a download file name.
pub async fn handle_report(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ReportRequest>,
) -> Result<Response, AppError> {
    let career = state
        .catalog
        .career_by_id(&req.career_id)
        .ok_or_else(|| AppError::NotFound(format!("Career {} not found", req.career_id)))?;

    let result = CareerMatchResult {
        career,
        match_score: req.match_score,
        breakdown: req.breakdown,
    };
    let user_name = req
        .user_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_READER);

    let body = render_career_report(&result, user_name, Utc::now().date_naive());
    let disposition = format!(
        "attachment; filename=\"{}\"",
        report_file_name(&career.title)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
