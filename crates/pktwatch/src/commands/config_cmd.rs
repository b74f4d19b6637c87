//! Config subcommand handlers.

use dialoguer::{Input, Select};
use secrecy::SecretString;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext tokens masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.access_token.is_some() {
            profile.access_token = Some(MASK.into());
        }
    }
    cfg
}

/// Format config for display. Expects an already redacted config.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "page_size = {}", cfg.defaults.page_size);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        if let Some(ref path) = p.login_path {
            let _ = writeln!(out, "login_path = \"{path}\"");
        }
        if let Some(size) = p.page_size {
            let _ = writeln!(out, "page_size = {size}");
        }
        if let Some(ref token) = p.access_token {
            let _ = writeln!(out, "access_token = \"{token}\"");
        }
        if let Some(ref env) = p.access_token_env {
            let _ = writeln!(out, "access_token_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

fn prompt_token() -> Result<SecretString, CliError> {
    let token = rpassword::prompt_password("Access token: ").map_err(prompt_err)?;
    if token.is_empty() {
        return Err(CliError::Validation {
            field: "access_token".into(),
            reason: "access token cannot be empty".into(),
        });
    }
    Ok(SecretString::from(token))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("pktwatch configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config_or_default();

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Server URL
            let server: String = Input::new()
                .with_prompt("API base URL")
                .default("https://localhost/api".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Page size
            let page_size: u32 = Input::new()
                .with_prompt("Rows per page")
                .default(cfg.defaults.page_size)
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = Profile {
                server,
                page_size: Some(page_size),
                ..Profile::default()
            };
            // Reject a bad URL before anything is written.
            pktwatch_config::profile_to_board_config(&profile, &cfg.defaults)?;

            // 4. Access token
            let choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
                "Skip for now",
            ];
            let selection = Select::new()
                .with_prompt("Access token")
                .items(choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            match selection {
                0 => {
                    let token = prompt_token()?;
                    config::store_access_token(&profile_name, &token)?;
                    eprintln!("   ✓ Access token stored in system keyring");
                }
                1 => {
                    let token = rpassword::prompt_password("Access token: ").map_err(prompt_err)?;
                    profile.access_token = Some(token).filter(|t| !t.is_empty());
                }
                _ => eprintln!("   Set it later with: pktwatch config set-token"),
            }

            // 5. Write config
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: pktwatch packets count");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config, |c| {
                let mut names: Vec<_> = c.profiles.keys().cloned().collect();
                names.sort();
                names.join("\n")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: config::available_profiles(&cfg),
                });
            }

            let token = prompt_token()?;
            config::store_access_token(&profile_name, &token)?;
            eprintln!("✓ Access token stored in system keyring for profile '{profile_name}'");
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: config::available_profiles(&cfg),
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }
    }
}
