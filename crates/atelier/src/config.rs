//! CLI configuration: thin wrapper around `atelier_config` shared types.
//!
//! Adds the resolution steps that respect `GlobalOpts` flag overrides
//! (--api-url, --insecure, --timeout) and the interactive password prompt.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use atelier_core::{AtelierConfig, Reconciliation, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use atelier_config::{Config, Profile, config_path, load_config, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Where the login session lives for this invocation.
pub fn session_path(global: &GlobalOpts) -> PathBuf {
    global
        .session_file
        .clone()
        .unwrap_or_else(atelier_config::session_path)
}

/// Build the runtime config from the active profile plus flag overrides.
///
/// With no matching profile, `--api-url` alone is enough. Naming a
/// profile that does not exist is an error.
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<AtelierConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut config = match cfg.profiles.get(&profile_name) {
        Some(profile) => atelier_config::profile_to_atelier_config(profile, &cfg.defaults)?,
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => {
            let url_str = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            AtelierConfig::new(parse_url(url_str)?)
        }
    };

    if let Some(ref url_str) = global.api_url {
        config.api_url = parse_url(url_str)?;
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    config.timeout = Duration::from_secs(global.timeout);
    // Each invocation exits right after its mutation; nobody reads the
    // reloaded list.
    config.reconciliation = Reconciliation::Deferred;
    Ok(config)
}

fn parse_url(url_str: &str) -> Result<url::Url, CliError> {
    url_str.parse().map_err(|_| CliError::Validation {
        field: "api-url".into(),
        reason: format!("invalid URL: {url_str}"),
    })
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Login email: explicit flag, then the profile.
pub fn login_email(
    flag: Option<String>,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<String, CliError> {
    let profile_name = active_profile_name(global, cfg);
    flag.or_else(|| {
        cfg.profiles
            .get(&profile_name)
            .and_then(|p| p.email.clone())
    })
    .ok_or_else(|| CliError::Validation {
        field: "email".into(),
        reason: "pass --email or set `email` in the profile".into(),
    })
}

/// Password from the profile's credential chain, falling back to an
/// interactive prompt when stdin is a terminal.
pub fn login_password(global: &GlobalOpts, cfg: &Config) -> Result<SecretString, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let resolved = match cfg.profiles.get(&profile_name) {
        Some(profile) => atelier_config::resolve_password(profile, &profile_name).ok(),
        None => std::env::var("ATELIER_PASSWORD").ok().map(SecretString::from),
    };
    if let Some(secret) = resolved {
        return Ok(secret);
    }

    if !std::io::stdin().is_terminal() {
        return Err(CliError::NoCredentials {
            profile: profile_name,
        });
    }
    let typed = rpassword::prompt_password("Password: ")?;
    if typed.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(typed))
}
