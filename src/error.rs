use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::cache::{StatsError, StoreError};
use crate::models::InvalidParameters;
use crate::utils::error_codes;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("No requests made yet.")]
    NotFound,
    #[error("failed to reach stats store")]
    StoreUnavailable(#[source] StoreError),
    #[error("failed to decode stats")]
    Decode(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl From<InvalidParameters> for AppError {
    fn from(e: InvalidParameters) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<StatsError> for AppError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::Store(e) => AppError::StoreUnavailable(e),
            StatsError::Encode(e) => AppError::Decode(e.to_string()),
            StatsError::Decode { key, reason } => AppError::Decode(format!("{}: {}", key, reason)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            AppError::NotFound => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            AppError::StoreUnavailable(e) => {
                tracing::error!("Stats store failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::STORE_UNAVAILABLE)
            }
            AppError::Decode(detail) => {
                tracing::error!("Stats decode failure: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::DECODE_ERROR)
            }
        };

        let body = Json(ErrorResponse {
            code,
            error_message: self.to_string(),
        });

        (status, body).into_response()
    }
}
