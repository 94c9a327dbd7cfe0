use crate::{
    api::{ApiClient, ClientConfig, RuntimeConfig},
    guard::RouteGuard,
    session::{FileStore, SessionStore},
};
use anyhow::{Context, Result};
use std::{path::PathBuf, sync::Arc};

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_base_url: Option<String>,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_base_url: Option<String>, session_file: PathBuf) -> Self {
        Self {
            api_base_url,
            session_file,
        }
    }

    /// Session store backing this invocation.
    #[must_use]
    pub fn store(&self) -> Arc<dyn SessionStore> {
        Arc::new(FileStore::new(self.session_file.clone()))
    }

    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::load().with_overrides(RuntimeConfig {
            api_base_url: self.api_base_url.clone(),
            with_credentials: None,
        })
    }

    /// # Errors
    /// Returns an error if the API base URL is not usable.
    pub fn client(&self, store: Arc<dyn SessionStore>) -> Result<ApiClient> {
        ApiClient::new(self.config(), store).context("failed to build API client")
    }

    #[must_use]
    pub fn guard(&self, store: Arc<dyn SessionStore>) -> RouteGuard {
        RouteGuard::new(store)
    }
}
