//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the failure modes of the service: invalid input, uniqueness
//! conflicts, failed authentication, missing (or not-owned) resources, and
//! unexpected server-side errors.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly
//! convert application errors into HTTP responses with JSON bodies. It also
//! provides `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, and
//! `bcrypt::BcryptError`, allowing conversion with the `?` operator.
//!
//! Authentication and ownership failures are deliberately low-information:
//! the client cannot distinguish "wrong password" from "unknown email", nor
//! "task does not exist" from "task belongs to someone else".

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed required input (HTTP 400).
    Validation(String),
    /// A unique-constraint violation, e.g. registering an email that is
    /// already taken (HTTP 400). The message never reveals which field
    /// conflicted.
    Conflict(String),
    /// Bad credentials or an invalid/expired/forged token (HTTP 401).
    Unauthorized(String),
    /// Resource absent, or present but not owned by the caller (HTTP 404).
    NotFound(String),
    /// An unexpected server-side error (HTTP 500).
    Internal(String),
    /// An error originating from database operations (HTTP 500).
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This lets Actix Web translate `AppError` results from handlers into the
/// correct HTTP status codes and JSON error bodies of the form
/// `{"message": "..."}`.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            AppError::Conflict(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "message": msg
            })),
            AppError::Internal(msg) => HttpResponse::InternalServerError().json(json!({
                "message": msg
            })),
            // Database errors are presented as generic internal server errors.
            AppError::Database(_) => HttpResponse::InternalServerError().json(json!({
                "message": "Internal server error"
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`, unique-constraint violations surfacing
/// at insert time map to `Conflict` (the pre-insert existence check is only
/// advisory; the database constraint is the authority), and everything else
/// becomes `Database`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Username or email already exists".into())
            }
            _ => AppError::Database(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// Used when JWT verification fails for any reason.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Validation("Title is required".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        let error = AppError::Conflict("Username or email already exists".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        let error = AppError::Unauthorized("Invalid email or password".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);

        let error = AppError::NotFound("Task not found".into());
        let response = error.error_response();
        assert_eq!(response.status(), 404);

        let error = AppError::Internal("Server error".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);

        let error = AppError::Database("connection reset".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        match error {
            AppError::NotFound(_) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
