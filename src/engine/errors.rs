use thiserror::Error;

use crate::domain::repositories::StorageError;

/// Message surfaced when a failed response carries no parseable error
pub const GENERIC_FAILURE_MESSAGE: &str = "Completion API call failed";

/// Message surfaced for failures outside the known taxonomy
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Errors that can occur while obtaining a completion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("Enter your OpenRouter API key")]
    MissingCredential,

    #[error("Select a template")]
    MissingTemplate,

    /// Non-success HTTP outcome or transport failure, with the best-effort message
    #[error("{0}")]
    NetworkOrServer(String),

    #[error("{0}")]
    Unknown(String),
}

pub type CompletionOutcome<T> = Result<T, CompletionError>;

/// Errors raised by the interactive session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template '{template}' has no field '{field}'")]
    UnknownField { template: String, field: String },

    #[error("Select a template")]
    NoTemplateSelected,

    #[error("A generation is already in progress")]
    AlreadyInFlight,

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type SessionResult<T> = Result<T, SessionError>;
