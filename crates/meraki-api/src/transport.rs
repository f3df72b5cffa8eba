// Shared transport configuration for building reqwest::Client instances.
//
// Carries the per-request timeout, the global concurrency ceiling, and the
// 429 retry budget. The concurrency ceiling and retry budget are enforced
// by DashboardClient, not by reqwest itself.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Default Dashboard API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1/";

/// Default per-request timeout, independent of batch duration.
pub const DEFAULT_TIMEOUT_SECS: u64 = 12;

/// Default ceiling on simultaneously outstanding requests.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Default number of 429 retries before a request is surfaced as failed.
pub const DEFAULT_MAXIMUM_RETRIES: u32 = 100;

/// Shared transport configuration for the Dashboard client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub max_concurrent_requests: usize,
    pub maximum_retries: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            maximum_retries: DEFAULT_MAXIMUM_RETRIES,
        }
    }
}

impl TransportConfig {
    /// Replace the base URL, normalizing it to end with a trailing slash so
    /// relative endpoint paths join underneath it.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, Error> {
        let mut url = Url::parse(raw)?;
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Build a `reqwest::Client` with the API key injected as a default
    /// `Authorization: Bearer` header on every request.
    pub fn build_client(&self, api_key: &SecretString) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|_| Error::InvalidApiKey)?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("meraki-cli/0.1.0")
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}
