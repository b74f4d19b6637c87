// ── Runtime board configuration ──
//
// Describes *how* to reach the packet API and how the board paginates.
// Never touches disk: the CLI builds a `BoardConfig` and hands it in.

use std::time::Duration;

use url::Url;

use pktwatch_api::{TlsMode, TransportConfig};

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Route the UI is sent to when the session is unusable.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging servers).
    DangerAcceptInvalid,
}

/// Configuration for a single packet board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// API base URL, path prefix included (e.g. `https://monitor.example/api`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Rows per page sent as `row`.
    pub page_size: u32,
    /// Target of login redirects.
    pub login_path: String,
}

impl BoardConfig {
    /// Config with default tuning for the given API base URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            login_path: DEFAULT_LOGIN_PATH.into(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
