//! Error types for the HTTP API.

use crate::registry::StoreError;
use crate::service::SubmissionError;
use allowlist_core::{ErrorResponse, Field};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// User-correctable rejection attributed to a field.
    #[error("{message}")]
    Rejected { field: Field, message: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Failed to submit form")]
    SubmitFailed(#[source] StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Rejected { .. } | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::SubmitFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn field(&self) -> Option<Field> {
        match self {
            ApiError::Rejected { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Store failures stay opaque to the caller
        if let ApiError::SubmitFailed(source) = &self {
            error!(error = %source, "{}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            field: self.field(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<SubmissionError> for ApiError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::Validation { field, .. } | SubmissionError::Duplicate { field } => {
                ApiError::Rejected {
                    field,
                    message: e.user_message(),
                }
            }
            SubmissionError::Store(source) => ApiError::SubmitFailed(source),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedPayload(rejection.body_text())
    }
}
