//! Unified error types for the Curses API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and persistence errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Which date of a curse a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateField::Start => write!(f, "start date"),
            DateField::End => write!(f, "end date"),
        }
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("curse '{0}' not found")]
    NotFound(String),

    #[error("invalid {field}: '{value}'")]
    InvalidDate { field: DateField, value: String },

    #[error("end date must not be before start date")]
    DateOrderViolation,

    #[error("{0} is required")]
    RequiredFieldMissing(&'static str),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("request timed out")]
    Timeout,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("invalid request format: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("invalid query: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("invalid path: {}", rejection.body_text()))
    }
}

/// Error response body for JSON responses
#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(self.to_string()))
            }
            AppError::Domain(DomainError::InvalidDate { .. }) => {
                (StatusCode::BAD_REQUEST, "Invalid date", Some(self.to_string()))
            }
            AppError::Domain(DomainError::DateOrderViolation) => (
                StatusCode::BAD_REQUEST,
                "Date order violation",
                Some(self.to_string()),
            ),
            AppError::Domain(DomainError::RequiredFieldMissing(_)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(self.to_string()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Request timeout",
                Some(self.to_string()),
            ),
        };

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
