//! CLI-owned configuration: figment-layered settings and credential
//! resolution, translated into a `meraki_api::TransportConfig`.
//!
//! Layering: built-in defaults, then an optional `meraki.toml` in the
//! working directory, then `MERAKI_*` environment variables, then
//! explicit CLI flags. The API key is separate: a single `APIKEY`
//! environment variable (or `--api-key`), read once at startup.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use meraki_api::TransportConfig;
use meraki_api::transport::{
    DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_MAXIMUM_RETRIES,
    DEFAULT_TIMEOUT_SECS,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Optional settings file in the working directory.
pub const CONFIG_FILE: &str = "meraki.toml";

/// Resolved runtime settings for a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Maximum simultaneously outstanding requests.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Rate-limit retry budget per request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            concurrency: default_concurrency(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENT_REQUESTS
}
fn default_max_retries() -> u32 {
    DEFAULT_MAXIMUM_RETRIES
}

/// Load settings from file + environment, then apply CLI flag overrides.
pub fn load_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let mut settings: Settings = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed("MERAKI_"))
        .extract()?;

    if let Some(ref base_url) = global.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(timeout) = global.timeout {
        settings.timeout = timeout;
    }
    if let Some(concurrency) = global.concurrency {
        settings.concurrency = concurrency;
    }
    if let Some(max_retries) = global.max_retries {
        settings.max_retries = max_retries;
    }

    Ok(settings)
}

/// Resolve the Dashboard API key (flag wins over the `APIKEY` env var,
/// which clap folds into the same field).
pub fn resolve_api_key(global: &GlobalOpts) -> Result<SecretString, CliError> {
    global
        .api_key
        .as_ref()
        .filter(|key| !key.is_empty())
        .map(|key| SecretString::from(key.clone()))
        .ok_or(CliError::NoCredentials)
}

/// Translate settings into the transport configuration.
pub fn transport(settings: &Settings) -> Result<TransportConfig, CliError> {
    let config = TransportConfig {
        timeout: std::time::Duration::from_secs(settings.timeout),
        max_concurrent_requests: settings.concurrency,
        maximum_retries: settings.max_retries,
        ..TransportConfig::default()
    };
    config
        .with_base_url(&settings.base_url)
        .map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {}", settings.base_url),
        })
}
