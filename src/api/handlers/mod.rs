// HTTP handlers

pub mod results;
pub mod session;
pub mod templates;

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
