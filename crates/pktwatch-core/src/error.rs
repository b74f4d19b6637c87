// ── Core error types ──
//
// User-facing errors from pktwatch-core. Consumers never see raw HTTP
// statuses or JSON parse failures; the `From<pktwatch_api::Error>` impl
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── State errors ─────────────────────────────────────────────────
    #[error("unexpected action type: {kind}")]
    UnexpectedAction { kind: String },

    #[error("No {category} filter option with id '{id}'")]
    UnknownFilterOption { category: String, id: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pktwatch_api::Error> for CoreError {
    fn from(err: pktwatch_api::Error) -> Self {
        match err {
            pktwatch_api::Error::Unauthorized { status, message } => {
                CoreError::AuthenticationFailed {
                    message: format!("HTTP {status}: {message}"),
                }
            }
            pktwatch_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            pktwatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            pktwatch_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            pktwatch_api::Error::Http { status: 404, message } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            pktwatch_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            pktwatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
