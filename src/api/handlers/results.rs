use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::completion::CompletionResult;

/// One archived result with its storage key
#[derive(Debug, Serialize)]
pub struct ArchivedResultResponse {
    pub key: String,
    #[serde(flatten)]
    pub result: CompletionResult,
}

/// List archived results, oldest first
///
/// GET /api/results
pub async fn list_results(
    State(studio): State<AppState>,
) -> Result<Json<Vec<ArchivedResultResponse>>, ApiError> {
    let entries = studio
        .archive()
        .entries()
        .map_err(|e| ApiError::internal_server_error(format!("Storage error: {}", e)))?;

    let responses = entries
        .into_iter()
        .map(|(key, result)| ArchivedResultResponse { key, result })
        .collect();

    Ok(Json(responses))
}

/// Download the newest result as a markdown file
///
/// GET /api/results/latest/export
pub async fn export_latest(State(studio): State<AppState>) -> Result<Response, ApiError> {
    let latest = studio
        .archive()
        .latest()
        .map_err(|e| ApiError::internal_server_error(format!("Storage error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("No result to export"))?;

    let filename = format!("analysis_{}.md", Utc::now().timestamp_millis());
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        latest.text,
    )
        .into_response())
}
