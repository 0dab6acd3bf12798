//! Unified error types for Folio backend services
//!
//! Every service converts its internal failures into [`ApiError`] before they
//! reach a handler boundary, so clients always see the same JSON envelope and
//! a stable machine-readable `kind` alongside the human-readable message.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Service error taxonomy shared by all Folio services.
///
/// The variants map onto client-facing semantics, not onto the subsystem that
/// produced them: a storage timeout and an upstream timeout are both
/// `Unavailable`, a uniqueness violation is always `Conflict`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed, missing, or disallowed input. Never retried.
    #[error("{0}")]
    InvalidInput(String),

    /// Uniqueness violation; the client should change the conflicting value.
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or an invalid/expired token.
    #[error("{0}")]
    Unauthorized(String),

    /// A referenced resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A dependency timed out or is unreachable. Safe to retry with backoff.
    #[error("{0}")]
    Unavailable(String),

    /// Unexpected failure. Details go to logs, not to the client.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Stable kind string carried in every error response.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Conflict(_) => "conflict",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::Unavailable(_) => "unavailable",
            ApiError::Internal(_) => "internal",
        }
    }
}

/// Failure envelope: `{ "success": false, "error": kind, "message": human }`.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            // The original API treats conflicts as a client mistake too.
            ApiError::InvalidInput(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Internal detail never reaches the client.
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            error: self.kind(),
            message,
        })
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
