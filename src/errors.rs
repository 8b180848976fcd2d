//! Centralized error handling.
//!
//! Provides a unified error type for the entire application, with a single
//! translation point into the wire envelope (`{ok: false, message, errors?}`).

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Access denied - missing token")]
    MissingToken,

    #[error("Session expired, please log in again")]
    ExpiredToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{field} is already in use")]
    Conflict { field: String },

    // Validation (field -> message)
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Wire envelope for error responses
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    ok: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, String>>,
}

impl AppError {
    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken | AppError::ExpiredToken | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::InvalidCredentials
            | AppError::Conflict { .. }
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details in release builds)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                if cfg!(debug_assertions) {
                    format!("Database error: {}", e)
                } else {
                    "Internal server error".to_string()
                }
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                if cfg!(debug_assertions) {
                    format!("Internal server error: {}", msg)
                } else {
                    "Internal server error".to_string()
                }
            }
            _ => self.to_string(),
        }
    }

    /// Per-field error map for the envelope, if this variant carries one
    fn field_errors(&self) -> Option<BTreeMap<String, String>> {
        match self {
            AppError::Validation(fields) => Some(fields.clone()),
            AppError::Conflict { field } => {
                let mut fields = BTreeMap::new();
                fields.insert(field.clone(), format!("{} is already in use", field));
                Some(fields)
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorEnvelope {
            ok: false,
            message: self.user_message(),
            errors: self.field_errors(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(field: impl Into<String>) -> Self {
        AppError::Conflict {
            field: field.into(),
        }
    }

    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        AppError::Validation(fields)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
