//! Authenticated HTTP client. Every outgoing request passes through a request
//! interceptor that attaches the most recently stored bearer token, and every response
//! passes through a response interceptor that purges stored credentials on 401. The
//! client never retries and never imposes its own timeout; callers own that policy.

use super::{
    config::ClientConfig,
    errors::{map_request_error, ApiError},
    response::ApiResponse,
};
use crate::session::{self, SessionKey, SessionStore};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Method, Request, RequestBuilder, StatusCode,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, warn};

/// How non-2xx responses reach the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Non-2xx statuses become `ApiError`s.
    #[default]
    Raise,
    /// Every status is returned as an `ApiResponse` so the caller can branch on it.
    Deliver,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
    default_bearer: Arc<RwLock<Option<SecretString>>>,
}

impl ApiClient {
    /// Builds a client around an injected session store.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .cookie_store(config.with_credentials)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            config,
            store,
            default_bearer: Arc::new(RwLock::new(None)),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Sets or clears the default bearer header sent when a request carries none.
    pub fn set_bearer(&self, token: Option<&str>) {
        let value = token
            .filter(|token| !token.is_empty())
            .map(|token| SecretString::from(token.to_string()));
        *self
            .default_bearer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = value;
    }

    #[must_use]
    pub fn has_default_bearer(&self) -> bool {
        self.default_bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn default_bearer(&self) -> Option<SecretString> {
        self.default_bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Starts a request against an endpoint path under the configured base URL.
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.url_for(path))
    }

    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    /// Runs a request through both interceptors.
    ///
    /// # Errors
    /// Returns transport failures, and under `StatusPolicy::Raise` any non-2xx status.
    pub async fn execute(
        &self,
        builder: RequestBuilder,
        policy: StatusPolicy,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = builder
            .build()
            .map_err(|err| ApiError::Serialization(format!("Failed to build request: {err}")))?;

        self.intercept_request(&mut request)?;

        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|err| map_request_error(&err))?;

        self.intercept_response(response, policy).await
    }

    /// Fetches and decodes JSON.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or decode failure.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.get(path), StatusPolicy::Raise)
            .await?
            .json()
    }

    /// Posts a JSON body and decodes a JSON response.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or decode failure.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.post(path).json(body), StatusPolicy::Raise)
            .await?
            .json()
    }

    /// Posts an empty JSON object and ignores the response body.
    ///
    /// # Errors
    /// Returns an error on transport failure or non-2xx status.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(
            self.post(path).json(&serde_json::json!({})),
            StatusPolicy::Raise,
        )
        .await
        .map(|_| ())
    }

    /// Attaches credentials. The store is read on every call so the header always
    /// reflects the most recently persisted token.
    fn intercept_request(&self, request: &mut Request) -> Result<(), ApiError> {
        let headers = request.headers_mut();

        if !headers.contains_key(AUTHORIZATION) {
            if let Some(token) = self.default_bearer() {
                headers.insert(AUTHORIZATION, bearer_value(&token)?);
            }
        }

        if let Some(token) = session::access_token(self.store.as_ref()) {
            headers.insert(AUTHORIZATION, bearer_value(&token)?);
        }

        Ok(())
    }

    async fn intercept_response(
        &self,
        response: reqwest::Response,
        policy: StatusPolicy,
    ) -> Result<ApiResponse, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.purge_credentials()?;
        }

        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Network(format!("Failed to read response: {err}")))?;
        let reply = ApiResponse::new(status.as_u16(), body);

        debug!(status = reply.status, "received response");

        if reply.is_success() || policy == StatusPolicy::Deliver {
            Ok(reply)
        } else {
            Err(ApiError::from_response(&reply))
        }
    }

    /// Drops the default header and the stored token after a 401. The header is
    /// always dropped; a store that cannot forget the token is reported to the caller.
    fn purge_credentials(&self) -> Result<(), ApiError> {
        warn!("Server rejected credentials, clearing stored access token");
        self.set_bearer(None);
        self.store.clear(SessionKey::AccessToken).map_err(|err| {
            error!("Failed to clear access token: {err}");
            ApiError::Session(err)
        })
    }
}

fn bearer_value(token: &SecretString) -> Result<HeaderValue, ApiError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        .map_err(|_| {
            ApiError::Serialization("Access token is not a valid header value".to_string())
        })?;
    value.set_sensitive(true);
    Ok(value)
}
