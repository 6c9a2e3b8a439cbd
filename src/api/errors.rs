use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::engine::errors::{CompletionError, SessionError, UNKNOWN_ERROR_MESSAGE};

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 502 Bad Gateway error
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::TemplateNotFound(_) => ApiError::not_found(err.to_string()),
            SessionError::UnknownField { .. } | SessionError::NoTemplateSelected => {
                ApiError::bad_request(err.to_string())
            }
            SessionError::AlreadyInFlight => ApiError::conflict(err.to_string()),
            SessionError::Completion(completion) => completion.into(),
            SessionError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure");
                ApiError::internal_server_error(format!("Storage error: {}", e))
            }
        }
    }
}

impl From<CompletionError> for ApiError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::MissingCredential | CompletionError::MissingTemplate => {
                ApiError::bad_request(err.to_string())
            }
            CompletionError::NetworkOrServer(message) => ApiError::bad_gateway(message),
            CompletionError::Unknown(_) => ApiError::internal_server_error(UNKNOWN_ERROR_MESSAGE),
        }
    }
}
