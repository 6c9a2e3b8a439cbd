use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::completion::CompletionResult;
use crate::engine::SessionSnapshot;

/// Request body for selecting a template
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTemplateRequest {
    pub template_id: String,
}

/// Request body for editing one form field
#[derive(Debug, Deserialize)]
pub struct UpdateFieldRequest {
    pub value: String,
}

/// Request body for changing the API credential
#[derive(Debug, Deserialize)]
pub struct UpdateCredentialRequest {
    pub credential: String,
}

/// Response carrying the generated prompt
#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

/// Current session state
///
/// GET /api/session
pub async fn get_session(State(studio): State<AppState>) -> Json<SessionSnapshot> {
    Json(studio.snapshot())
}

/// Select a template, resetting the form
///
/// POST /api/session/template
pub async fn select_template(
    State(studio): State<AppState>,
    Json(req): Json<SelectTemplateRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    Ok(Json(studio.select_template(&req.template_id)?))
}

/// Update one field of the selected template
///
/// PUT /api/session/fields/:id
pub async fn update_field(
    State(studio): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    Ok(Json(studio.set_field(&id, req.value)?))
}

/// Replace and persist the API credential
///
/// PUT /api/session/credential
pub async fn update_credential(
    State(studio): State<AppState>,
    Json(req): Json<UpdateCredentialRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let snapshot = tokio::task::spawn_blocking(move || studio.set_credential(req.credential))
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to join task: {}", e)))??;
    Ok(Json(snapshot))
}

/// Preview the prompt the current form would send
///
/// POST /api/session/prompt
pub async fn preview_prompt(
    State(studio): State<AppState>,
) -> Result<Json<PromptResponse>, ApiError> {
    let prompt = studio.prompt()?;
    Ok(Json(PromptResponse { prompt }))
}

/// Send the prompt to the completion API and archive the result
///
/// POST /api/session/generate
pub async fn generate(
    State(studio): State<AppState>,
) -> Result<Json<CompletionResult>, ApiError> {
    let result = studio.generate().await?;
    Ok(Json(result))
}
