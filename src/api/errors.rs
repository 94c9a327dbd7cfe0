use super::response::ApiResponse;
use crate::session::SessionError;
use thiserror::Error;

/// Failures surfaced to callers of the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },
    #[error("Forbidden: {message}")]
    Forbidden { message: String },
    #[error("Request failed ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Classifies a non-2xx response.
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Self {
        let status = response.status;
        let message = response.message();
        match status {
            401 => ApiError::Unauthorized { message },
            403 => ApiError::Forbidden { message },
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Rejected { status, message },
        }
    }

    /// HTTP status carried by the error, if it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::Rejected { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for inline display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Forbidden { message }
            | ApiError::Rejected { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::InvalidInput(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Maps transport errors into `ApiError` variants with timeout detection.
pub(crate) fn map_request_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        ApiError::Serialization(format!("Failed to build request: {err}"))
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}
