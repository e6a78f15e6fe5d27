/**
 * Backend Error Types
 *
 * This module defines error types returned by HTTP handlers.
 *
 * # Error Categories
 *
 * ## Caller Errors
 *
 * - `HandlerError` - malformed requests (empty names and the like)
 * - `NotFound` - the addressed entry does not exist in this community
 * - `InvalidMove` - the requested position contradicts the current order,
 *   reported as 409 Conflict with the reason as message
 *
 * ## Infrastructure Errors
 *
 * - `Database` - storage failures, the transaction has been rolled back
 * - `Config` - configuration could not be loaded
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::{ConfigError, InvalidMove, ListError};

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use spaced_list::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "name must not be empty");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::not_found("category", 42);
/// assert_eq!(err.message(), "category 42 not found");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Addressed resource does not exist
    #[error("{resource} {id} not found")]
    NotFound {
        /// Kind of resource
        resource: &'static str,
        /// Requested id
        id: i64,
    },

    /// Rejected move request
    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ListError> for BackendError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::InvalidMove(reason) => Self::InvalidMove(reason),
            ListError::Database(err) => Self::Database(err),
        }
    }
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `NotFound` - 404 Not Found
    /// - `InvalidMove` - 409 Conflict
    /// - `Database` - 500 Internal Server Error
    /// - `Config` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidMove(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    ///
    /// Storage errors are not echoed to clients.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::NotFound { .. } | Self::InvalidMove(_) => self.to_string(),
            Self::Database(_) | Self::Config(_) => "Internal server error".to_string(),
        }
    }
}
