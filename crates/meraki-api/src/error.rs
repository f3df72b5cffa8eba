use thiserror::Error;

/// Top-level error type for the `meraki-api` crate.
///
/// Covers every failure mode of the Dashboard API surface: authentication,
/// transport, rate limiting, and response decoding. `meraki-core` maps these
/// into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API key rejected by the Dashboard (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The shared request limiter was closed while a request was queued.
    #[error("Request limiter closed")]
    LimiterClosed,

    // ── Rate limiting ───────────────────────────────────────────────
    /// The 429 retry budget ran out without a successful response.
    #[error("Rate limit retry budget exhausted after {retries} retries")]
    RateLimitExhausted { retries: u32 },

    // ── Dashboard API ───────────────────────────────────────────────
    /// Structured error from the Dashboard (parsed from the
    /// `{"errors": [...]}` body when present).
    #[error("Dashboard API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying at a
    /// higher level (a fresh run may succeed).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimitExhausted { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this error is a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
