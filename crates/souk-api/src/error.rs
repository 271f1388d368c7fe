//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from souk-dispute and souk-backend-client to HTTP
//! status codes with JSON error bodies. Internal error details are never
//! exposed in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use souk_backend_client::BackendApiError;
use souk_dispute::DisputeError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// The error payload.
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CONFLICT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Conflict with current dispute state (409): invalid transitions,
    /// mutations on resolved disputes, stale-version persistence.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Marketplace backend returned an error or is unreachable (502).
    /// Local state has been rolled back; the caller may retry.
    #[error("upstream backend error: {0}")]
    Upstream(String),

    /// A required collaborator is not configured in this deployment (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal/upstream error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upstream(_) => {
                "The marketplace backend rejected the request or is unreachable".to_string()
            }
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "upstream backend error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Workflow violations map to client-visible statuses: state-machine
/// rejections are conflicts; input problems are validation errors.
impl From<DisputeError> for AppError {
    fn from(err: DisputeError) -> Self {
        match &err {
            DisputeError::InvalidTransition { .. }
            | DisputeError::DisputeResolved { .. }
            | DisputeError::AlreadyResolved { .. } => Self::Conflict(err.to_string()),
            DisputeError::MissingResolutionMessage
            | DisputeError::EmptyMessage
            | DisputeError::InvalidSlaWindows { .. } => Self::Validation(err.to_string()),
        }
    }
}

impl From<BackendApiError> for AppError {
    fn from(err: BackendApiError) -> Self {
        match &err {
            BackendApiError::Conflict { .. } => Self::Conflict(err.to_string()),
            BackendApiError::NotFound { .. } => Self::NotFound(err.to_string()),
            BackendApiError::Unavailable { .. }
            | BackendApiError::Api { .. }
            | BackendApiError::Decode { .. } => Self::Upstream(err.to_string()),
            BackendApiError::Config(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<souk_core::ValidationError> for AppError {
    fn from(err: souk_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
