use super::errors::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Maximum number of error body characters surfaced to the caller.
const MAX_ERROR_CHARS: usize = 200;

/// A fully read HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    /// Returns `ApiError::Parse` when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body)
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    }

    /// Reads a top-level string field from a JSON object body.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<String> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        value
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToString::to_string)
    }

    /// The backend's `detail` field, else its `message` field.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        self.field("detail").or_else(|| self.field("message"))
    }

    /// Detail when present, otherwise the sanitized body.
    #[must_use]
    pub fn message(&self) -> String {
        self.detail().unwrap_or_else(|| sanitize_body(&self.body))
    }
}

/// Trims and truncates error bodies for display.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
