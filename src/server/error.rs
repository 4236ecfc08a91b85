//! HTTP error payloads for the RSVP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::error::AppError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Validation detail stays in the logs; callers get a generic message.
    #[error("Failed to create RSVP")]
    CreateFailed,

    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: AppError,
    },
}

impl ApiError {
    pub fn store(message: &'static str, source: AppError) -> Self {
        Self::Store { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::CreateFailed => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Failed to create RSVP" })),
            )
                .into_response(),
            ApiError::Store { message, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message, "details": source.to_string() })),
            )
                .into_response(),
        }
    }
}
