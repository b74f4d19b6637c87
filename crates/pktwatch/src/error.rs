//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use pktwatch_config::ConfigError;
use pktwatch_core::{CoreError, RedirectReason};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to server at {url}")]
    #[diagnostic(
        code(pktwatch::connection_failed),
        help(
            "Check that the monitoring server is running and reachable.\n\
             URL: {url}\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(pktwatch::auth_failed),
        help("Store a fresh access token with: pktwatch config set-token")
    )]
    AuthFailed { message: String },

    #[error("Login required: {reason} (redirected to {path})")]
    #[diagnostic(
        code(pktwatch::login_required),
        help(
            "Store an access token with: pktwatch config set-token\n\
             Or pass --token / set PKTWATCH_TOKEN. Run with -v to see the request error."
        )
    )]
    LoginRequired { path: String, reason: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(pktwatch::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(pktwatch::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pktwatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(pktwatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: pktwatch config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(pktwatch::no_config),
        help(
            "Create a profile with: pktwatch config init\n\
             Or pass --server. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(pktwatch::config))]
    Config(#[from] ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out")]
    #[diagnostic(
        code(pktwatch::timeout),
        help("Increase timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::LoginRequired { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn login_required(path: &str, reason: RedirectReason) -> Self {
        let reason = match reason {
            RedirectReason::MissingToken => "no access token configured",
            RedirectReason::RequestFailed => "the server rejected the request",
        };
        Self::LoginRequired {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                resource_type: entity_type,
                identifier,
            },

            CoreError::UnexpectedAction { kind } => CliError::Validation {
                field: "action".into(),
                reason: format!("unexpected action type: {kind}"),
            },

            CoreError::UnknownFilterOption { category, id } => CliError::Validation {
                field: category,
                reason: format!("unknown option '{id}'"),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "unknown".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirects_exit_with_auth_code() {
        let err = CliError::login_required("/login", RedirectReason::MissingToken);
        assert_eq!(err.exit_code(), exit_code::AUTH);
        assert!(err.to_string().contains("no access token"));
    }

    #[test]
    fn core_errors_keep_their_category() {
        let err = CliError::from(CoreError::Api {
            message: "boom".into(),
            status: Some(502),
        });
        assert_eq!(err.to_string(), "API error (502): boom");
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::from(CoreError::ValidationFailed {
                message: "page numbers start at 1".into()
            })
            .exit_code(),
            exit_code::USAGE
        );
    }
}
