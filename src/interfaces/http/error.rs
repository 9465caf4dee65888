//! Domain error → HTTP response mapping
//!
//! Handlers return `Result<_, ApiError>` and use `?`; every domain variant
//! maps to one stable status code so callers can render specific messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::common::ApiResponse;
use crate::domain::DomainError;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) | DomainError::InvalidMeasurementUnit(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            DomainError::ReadingDateNotAllowed
            | DomainError::ReadingNotAllowed(_)
            | DomainError::ReadingNotLast
            | DomainError::CanOnlyDeleteMostRecentReading
            | DomainError::WaterMeterInactive(_)
            | DomainError::NoReadingsProvided
            | DomainError::NonPositiveInterval { .. } => StatusCode::CONFLICT,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "Request failed with storage error");
        }
        (status, Json(ApiResponse::<()>::error(self.0.to_string()))).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────
