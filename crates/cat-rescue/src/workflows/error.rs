use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use super::store::RepositoryError;

/// Stable classification of workflow failures, shared with API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    Conflict,
    Validation,
    Unavailable,
}

impl ErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Validation => "validation",
            ErrorKind::Unavailable => "unavailable",
        }
    }

    pub const fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidState | ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Error raised by every workflow manager.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

impl WorkflowError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::NotFound { .. } => ErrorKind::NotFound,
            WorkflowError::InvalidState(_) => ErrorKind::InvalidState,
            WorkflowError::Conflict(_) => ErrorKind::Conflict,
            WorkflowError::Validation(_) => ErrorKind::Validation,
            WorkflowError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<RepositoryError> for WorkflowError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict => {
                Self::Conflict("the store rejected a concurrent write".to_string())
            }
            RepositoryError::NotFound => Self::not_found("record", "unknown"),
            RepositoryError::Unavailable(reason) => Self::Unavailable(reason),
        }
    }
}

impl IntoResponse for WorkflowError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let body = Json(json!({
            "error": kind.label(),
            "message": self.to_string(),
        }));
        (kind.status_code(), body).into_response()
    }
}
