//! Error types for the Kyte client library.

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for all Kyte client operations.
#[derive(Error, Debug)]
pub enum KyteError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The backend answered with a non-200 status
    #[error("HTTP error: {status} - {body}")]
    Status {
        /// Status code of the response
        status: StatusCode,
        /// Raw response body, verbatim
        body: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body on a 200 was not valid JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Session response lacked a required token field
    #[error("Response missing required field: {0}")]
    MissingField(&'static str),

    /// HTTP method is not one of POST/PUT/GET/DELETE
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Request was malformed before dispatch (missing body, bad header value)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid key material or HMAC initialization failure
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Identity timestamp could not be formatted
    #[error("Timestamp formatting error: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl KyteError {
    /// The HTTP status code, for status errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            KyteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
