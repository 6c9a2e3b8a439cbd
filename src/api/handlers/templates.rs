use axum::{extract::State, Json};

use crate::api::AppState;
use crate::domain::template::Template;

/// List the framework templates in display order
///
/// GET /api/templates
pub async fn list_templates(State(studio): State<AppState>) -> Json<Vec<Template>> {
    let templates = studio
        .templates()
        .all()
        .iter()
        .map(|template| template.as_ref().clone())
        .collect();

    Json(templates)
}
