// ── Core error types ──
//
// User-facing errors from meraki-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<meraki_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Resolution errors (fatal before any dispatch) ────────────────
    #[error("Organization not found: {selector}")]
    OrganizationNotFound { selector: String },

    #[error("Network not found: {identifier}")]
    NetworkNotFound { identifier: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Batch errors ─────────────────────────────────────────────────
    /// A dispatch batch produced the same sub-resource key twice. This is
    /// a resolver bug, not a remote condition, and fails the whole run.
    #[error("Duplicate sub-resource key in dispatch batch: {key}")]
    DuplicateKey { key: String },

    /// The batch was cancelled before completing; no report was produced.
    #[error("Run cancelled")]
    Cancelled,

    // ── Remote errors (after transport retries) ──────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Report emission ──────────────────────────────────────────────
    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report encoding error: {0}")]
    Csv(#[from] csv::Error),

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<meraki_api::Error> for CoreError {
    fn from(err: meraki_api::Error) -> Self {
        match err {
            meraki_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "API key rejected by the Dashboard".into(),
            },
            meraki_api::Error::Transport(ref e) if e.is_timeout() => CoreError::Timeout {
                message: e.to_string(),
            },
            meraki_api::Error::Transport(e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            meraki_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            meraki_api::Error::RateLimitExhausted { retries } => CoreError::Api {
                message: format!("rate limit retry budget exhausted after {retries} retries"),
                status: Some(429),
            },
            meraki_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            meraki_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            meraki_api::Error::LimiterClosed => CoreError::Cancelled,
        }
    }
}
