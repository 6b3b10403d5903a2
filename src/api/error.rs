//! API Client Error Types
//!
//! Every endpoint surfaces one kind of failure for a non-success HTTP status
//! (`ApiError::Request`). Transport failures pass through unchanged.

use thiserror::Error;

use crate::session::SessionError;

/// Errors returned by [`QuizClient`](super::QuizClient) calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    ///
    /// `message` is the body's `detail` field when present, otherwise
    /// `"Request failed with status <status>"`.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The request never produced a response (DNS, refused connection, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A success body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Persisting the session after login/register failed
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status of a failed request, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Failures below the HTTP layer
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("could not connect: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
