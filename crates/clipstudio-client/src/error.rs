//! API client error types.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Result type for API client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Coarse classification of an [`ApiError`], used by facades and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCause {
    Network,
    Timeout,
    BackendUnavailable,
    HttpError,
    Decode,
    Config,
}

impl ErrorCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCause::Network => "network",
            ErrorCause::Timeout => "timeout",
            ErrorCause::BackendUnavailable => "backend-unavailable",
            ErrorCause::HttpError => "http-error",
            ErrorCause::Decode => "decode",
            ErrorCause::Config => "config",
        }
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the request executor. The executor never swallows them;
/// facades decide whether to substitute mock data.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Backend is not available: {0}")]
    BackendUnavailable(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn backend_unavailable(msg: impl Into<String>) -> Self {
        Self::BackendUnavailable(msg.into())
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Map a transport error, distinguishing timeouts from other failures.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }

    pub fn cause(&self) -> ErrorCause {
        match self {
            ApiError::Network(_) => ErrorCause::Network,
            ApiError::Timeout(_) => ErrorCause::Timeout,
            ApiError::BackendUnavailable(_) => ErrorCause::BackendUnavailable,
            ApiError::Http { .. } => ErrorCause::HttpError,
            ApiError::Decode(_) => ErrorCause::Decode,
            ApiError::Config(_) => ErrorCause::Config,
        }
    }

    /// HTTP status code, if the backend answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message, suitable for a toast.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
