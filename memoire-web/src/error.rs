//! Error types for memoire-web
//!
//! One error enum for the whole service; the IntoResponse impl maps each
//! variant to an HTTP status with a JSON error body so no handler ever
//! leaks an unformatted failure to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for memoire-web
#[derive(Error, Debug)]
pub enum Error {
    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Session gate rejected the request
    #[error("Unauthorized")]
    Unauthorized,

    /// Upstream title service unreachable
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using memoire-web Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<memoire_common::Error> for Error {
    fn from(e: memoire_common::Error) -> Self {
        match e {
            memoire_common::Error::Database(e) => Error::Database(e),
            other => Error::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "authentication required".to_string()),
            Error::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            Error::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
            }
            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
