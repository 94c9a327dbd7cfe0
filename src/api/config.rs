//! Build-time configuration for the API endpoint with an optional runtime override.
//! The build-time value comes from `BITVA_API_BASE_URL`; the CLI can replace it per
//! invocation. Configuration values are public; do not store secrets here.

use super::errors::ApiError;
use url::Url;

/// Same-origin `/api` path served by the reverse proxy in front of the backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost/api";

/// Client configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Send and keep cookies across calls.
    pub with_credentials: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            with_credentials: true,
        }
    }
}

impl ClientConfig {
    /// Loads config from build-time environment variables.
    #[must_use]
    pub fn load() -> Self {
        let api_base_url = option_env!("BITVA_API_BASE_URL")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            api_base_url,
            ..Self::default()
        }
    }

    /// Applies runtime overrides; blank values keep the current setting.
    #[must_use]
    pub fn with_overrides(mut self, overrides: RuntimeConfig) -> Self {
        if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_runtime_value) {
            self.api_base_url = value;
        }
        if let Some(value) = overrides.with_credentials {
            self.with_credentials = value;
        }
        self
    }

    /// Validates the base URL.
    ///
    /// # Errors
    /// Returns `ApiError::Config` when the base is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = Url::parse(self.api_base_url.trim())
            .map_err(|err| ApiError::Config(format!("Invalid API base URL: {err}")))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ApiError::Config(format!(
                "Unsupported API base URL scheme: {scheme}"
            ))),
        }
    }

    /// Joins the configured base with an endpoint path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        build_url_with_base(&self.api_base_url, path)
    }
}

/// Values that may replace the build-time configuration at runtime.
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub with_credentials: Option<bool>,
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
