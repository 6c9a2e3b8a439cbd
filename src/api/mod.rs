// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::engine::Studio;
use handlers::{health_check, results, session, templates};

/// Shared handler state
pub type AppState = Arc<Studio>;

/// Build the API router over `studio`
pub fn router(studio: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Template routes
        .route("/api/templates", get(templates::list_templates))
        // Session routes
        .route("/api/session", get(session::get_session))
        .route("/api/session/template", post(session::select_template))
        .route("/api/session/fields/:id", put(session::update_field))
        .route("/api/session/credential", put(session::update_credential))
        .route("/api/session/prompt", post(session::preview_prompt))
        .route("/api/session/generate", post(session::generate))
        // Result routes
        .route("/api/results", get(results::list_results))
        .route("/api/results/latest/export", get(results::export_latest))
        .with_state(studio)
}
