//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text, and errors onto process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use meraki_core::CoreError;

/// Exit codes for the `meraki` binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resolution ───────────────────────────────────────────────────
    #[error("Organization '{selector}' not found")]
    #[diagnostic(
        code(meraki::org_not_found),
        help(
            "Only API-enabled organizations are visible.\n\
             Check the exact name or pass the id with -i."
        )
    )]
    OrgNotFound { selector: String },

    #[error("Network '{identifier}' not found")]
    #[diagnostic(
        code(meraki::network_not_found),
        help("Network names must match exactly, including case.")
    )]
    NetworkNotFound { identifier: String },

    #[error("{resource} '{identifier}' not found")]
    #[diagnostic(code(meraki::not_found))]
    NotFound {
        resource: String,
        identifier: String,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(meraki::auth_failed),
        help("Verify the APIKEY environment variable holds a valid Dashboard API key.")
    )]
    AuthFailed { message: String },

    #[error("No API key configured")]
    #[diagnostic(
        code(meraki::no_credentials),
        help("Set the APIKEY environment variable or pass --api-key.")
    )]
    NoCredentials,

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(meraki::validation))]
    Validation { field: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(meraki::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("Request timed out: {message}")]
    #[diagnostic(
        code(meraki::timeout),
        help("Increase --timeout or check Dashboard responsiveness.")
    )]
    Timeout { message: String },

    // ── Run control ──────────────────────────────────────────────────
    #[error("Run cancelled")]
    #[diagnostic(code(meraki::cancelled))]
    Cancelled,

    // ── IO / Configuration ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(meraki::config))]
    Config(Box<figment::Error>),

    #[error("{message}")]
    #[diagnostic(code(meraki::internal))]
    Internal { message: String },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::OrgNotFound { .. } | Self::NetworkNotFound { .. } | Self::NotFound { .. } => {
                exit_code::NOT_FOUND
            }
            Self::Validation { .. } => exit_code::USAGE,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Cancelled => exit_code::INTERRUPTED,
            // Errors without an HTTP status never reached the Dashboard.
            Self::ApiError { status: None, .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OrganizationNotFound { selector } => CliError::OrgNotFound { selector },

            CoreError::NetworkNotFound { identifier } => CliError::NetworkNotFound { identifier },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::DuplicateKey { key } => CliError::Internal {
                message: format!("duplicate sub-resource key in dispatch batch: {key}"),
            },

            CoreError::Cancelled => CliError::Cancelled,

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { message } => CliError::Timeout { message },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Io(e) => CliError::Io(e),

            CoreError::Csv(e) => CliError::Internal {
                message: format!("report encoding failed: {e}"),
            },

            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}

impl From<meraki_api::Error> for CliError {
    fn from(err: meraki_api::Error) -> Self {
        CoreError::from(err).into()
    }
}
