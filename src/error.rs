use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// A single rejected form field.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `STORAGE_ERROR`, `INTERNAL_ERROR`.
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
    /// Field-level messages for a rejected submission, so the form can be
    /// re-rendered with each failing field annotated.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// A submission failed field validation. Nothing was written.
    Form(Vec<FieldError>),
    Validation(String),
    NotFound(String),
    /// A write failed after validation passed and was rolled back. Carries the
    /// user-facing message; the storage detail is only logged.
    Storage(String),
    Internal(String),
}

impl AppError {
    /// Log a failed storage operation and wrap it in the generic user-facing
    /// message for the entity being written.
    pub fn storage(err: DbErr, message: impl Into<String>) -> Self {
        tracing::error!(error = %err, "storage operation failed");
        AppError::Storage(message.into())
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Form(errors) => {
                let summary = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        code: "VALIDATION_ERROR",
                        message: format!("Please fix the following errors: {summary}"),
                        errors,
                    },
                )
            }
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message,
                    errors: Vec::new(),
                },
            ),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message,
                    errors: Vec::new(),
                },
            ),
            AppError::Storage(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    code: "STORAGE_ERROR",
                    message,
                    errors: Vec::new(),
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                        errors: Vec::new(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
