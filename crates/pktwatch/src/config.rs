//! CLI configuration: thin wrapper around `pktwatch_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --token, etc.).

use std::time::Duration;

use secrecy::SecretString;

use pktwatch_core::{BoardConfig, Session, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use pktwatch_config::{
    Config, Profile, config_path, load_config_or_default, save_config,
    store_access_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// "a, b" or "(none)" for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build the board configuration and session from config file + flags.
///
/// Flag overrides take priority over profile values. A missing token is
/// not an error here: the board reports it as a login redirect.
pub fn resolve_board(global: &GlobalOpts) -> Result<(BoardConfig, Session), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match (cfg.profiles.get(&profile_name), global.server.as_ref()) {
        (Some(profile), _) => profile.clone(),
        (None, Some(server)) => Profile {
            server: server.clone(),
            ..Profile::default()
        },
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    // 1. Server (flag > env > profile)
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }

    let mut board = pktwatch_config::profile_to_board_config(&profile, &cfg.defaults)?;

    // 2. TLS and timeout flags
    if global.insecure {
        board.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        board.timeout = Duration::from_secs(secs);
    }

    // 3. Token (flag > profile chain)
    let token = global
        .token
        .clone()
        .map(SecretString::from)
        .or_else(|| pktwatch_config::resolve_access_token(&profile, &profile_name));

    tracing::debug!(
        profile = %profile_name,
        server = %board.url,
        has_token = token.is_some(),
        "resolved board configuration"
    );

    Ok((board, Session::new(token)))
}
