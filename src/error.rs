use std::io;
use thiserror::Error;

/// Custom error types for the albania-weather application
#[derive(Error, Debug)]
pub enum AppError {
    /// Input did not map to any of the known regions
    #[error("Unknown city or region: {0}")]
    UnresolvedCity(String),

    /// Server answered with a non-success status
    #[error("Error {status}: {reason}")]
    HttpError { status: u16, reason: String },

    /// Error when environment variable is not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP request error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Body was not valid JSON or lacked a required field
    #[error("Failed to parse API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Wrapper for I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// Build an `HttpError` from a response status, using the canonical reason phrase.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        AppError::HttpError {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}
