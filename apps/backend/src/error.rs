//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stepcards_core::{SchedulerError, StoreError};
use thiserror::Error;

use crate::services::settings::SettingsError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
            ApiError::Task(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::Scheduler(err) => match err {
                SchedulerError::InvalidParameters(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "invalid_parameters")
                }
                SchedulerError::InvalidTimestamp { .. } => {
                    (StatusCode::CONFLICT, "invalid_timestamp")
                }
                SchedulerError::InvalidRating(_) | SchedulerError::UnknownRating(_) => {
                    (StatusCode::BAD_REQUEST, "invalid_rating")
                }
                SchedulerError::DueDateOutOfRange { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "due_date_out_of_range")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_kind();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let details = match &self {
            ApiError::Scheduler(SchedulerError::InvalidParameters(errors)) => errors.messages(),
            _ => Vec::new(),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Invalid(err) => ApiError::Scheduler(err),
            SettingsError::Store(err) => ApiError::Store(err),
            SettingsError::Io(err) => ApiError::Store(StoreError::Io(err)),
            SettingsError::Malformed(err) => {
                ApiError::Store(StoreError::Serialization(err.to_string()))
            }
        }
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
