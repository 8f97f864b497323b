use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

/// Request-level failure taxonomy. Validation failures on the update paths do
/// not pass through here; those are returned as structured results so the
/// client can redisplay the form in place.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(String),
    Storage(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Failed: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(msg) => {
                HttpResponse::NotFound().json(ErrorResponse { error: msg.clone() })
            }
            AppError::Validation(msg) => {
                HttpResponse::BadRequest().json(ErrorResponse { error: msg.clone() })
            }
            // Storage details are logged at the call site; clients get a
            // generic failure rather than internals.
            AppError::Storage(_) => HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Internal server error".to_string(),
            }),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            other => AppError::Storage(other.to_string()),
        }
    }
}
