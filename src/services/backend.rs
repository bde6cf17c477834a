//! Data backend client bootstrap.
//!
//! Validates the configured project URL and anon key, derives the REST and
//! auth endpoints, and keeps the resulting [`BackendClient`] for the page
//! lifetime. In the browser, `init` also fires a connectivity probe against
//! the auth health endpoint without waiting for it; the probe logs its own
//! outcome.

use std::sync::OnceLock;

use super::Service;
use crate::config::BackendConfig;
use crate::error::ServiceError;

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

pub const SERVICE_NAME: &str = "backend";

/// Resolved endpoints and credentials for the data backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendClient {
    rest_url: String,
    auth_url: String,
    anon_key: String,
}

impl BackendClient {
    /// # Errors
    ///
    /// Returns [`ServiceError::NotConfigured`] if the URL or key is missing,
    /// or the URL is not `http(s)`.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ServiceError> {
        let base = config
            .base_url
            .as_deref()
            .ok_or_else(|| not_configured("missing base url"))?;
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(not_configured(&format!("base url must be http(s): {base}")));
        }
        let anon_key = config
            .anon_key
            .clone()
            .ok_or_else(|| not_configured("missing anon key"))?;

        let base = base.trim_end_matches('/');
        Ok(Self { rest_url: format!("{base}/rest/v1"), auth_url: format!("{base}/auth/v1"), anon_key })
    }

    #[must_use]
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// REST endpoint for one table.
    #[must_use]
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    /// Headers every backend request carries.
    #[must_use]
    pub fn headers(&self) -> [(&'static str, String); 2] {
        [("apikey", self.anon_key.clone()), ("Authorization", format!("Bearer {}", self.anon_key))]
    }
}

fn not_configured(reason: &str) -> ServiceError {
    ServiceError::NotConfigured { service: SERVICE_NAME, reason: reason.to_owned() }
}

#[derive(Debug, Default)]
pub struct DataBackend {
    config: BackendConfig,
    client: OnceLock<BackendClient>,
}

impl DataBackend {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self { config, client: OnceLock::new() }
    }

    /// The client built by `init`, if it succeeded.
    #[must_use]
    pub fn client(&self) -> Option<&BackendClient> {
        self.client.get()
    }
}

impl Service for DataBackend {
    fn name(&self) -> &'static str {
        SERVICE_NAME
    }

    fn init(&self) -> Result<(), ServiceError> {
        if self.client.get().is_some() {
            return Err(ServiceError::AlreadyInitialized { service: SERVICE_NAME });
        }
        let client = BackendClient::from_config(&self.config)?;

        #[cfg(feature = "csr")]
        spawn_probe(client.clone());

        self.client
            .set(client)
            .map_err(|_| ServiceError::AlreadyInitialized { service: SERVICE_NAME })
    }
}

/// Ping the auth health endpoint in the background.
#[cfg(feature = "csr")]
fn spawn_probe(client: BackendClient) {
    use crate::diagnostics::LOG_TARGET;

    wasm_bindgen_futures::spawn_local(async move {
        let url = format!("{}/health", client.auth_url());
        let mut request = gloo_net::http::Request::get(&url);
        for (name, value) in client.headers() {
            request = request.header(name, &value);
        }
        match request.send().await {
            Ok(resp) if resp.ok() => log::debug!(target: LOG_TARGET, "backend reachable at {url}"),
            Ok(resp) => log::warn!(target: LOG_TARGET, "backend health check returned {}", resp.status()),
            Err(e) => log::warn!(target: LOG_TARGET, "backend unreachable: {e}"),
        }
    });
}
