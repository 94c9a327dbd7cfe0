//! Endpoint clients grouped by feature area. Each call goes through the shared
//! [`ApiClient`](crate::api::ApiClient), so credentials are attached and 401 cleanup
//! happens in one place; the functions here only shape payloads and interpret results.

pub mod admin;
pub mod auth;
pub mod profile;

use serde::Deserialize;

/// Acknowledgement body returned by most write endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub msg: Option<String>,
}

impl Message {
    pub(crate) fn text_or(self, fallback: &str) -> String {
        self.msg
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}
