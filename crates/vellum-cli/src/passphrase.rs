//! Passphrase and salt resolution.
//!
//! The passphrase comes from `VELLUM_PASSPHRASE` or an interactive prompt and
//! is held as a `SecretString` until the core call. The salt comes from the
//! `--salt` flag, `VELLUM_SALT`, or the config file, in that order.

use std::io::IsTerminal;

use dialoguer::Password;
use secrecy::SecretString;

use crate::config::VellumConfig;
use crate::constants::{ENV_PASSPHRASE, ENV_SALT};
use crate::errors::CliError;

/// Which operation the passphrase is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Encrypt,
    Decrypt,
}

/// Read the passphrase from the environment or prompt for it.
///
/// Encryption prompts twice and requires both entries to match.
pub fn resolve_passphrase(purpose: Purpose, no_input: bool) -> anyhow::Result<SecretString> {
    if let Some(value) = non_blank_env(ENV_PASSPHRASE) {
        tracing::debug!("passphrase taken from {}", ENV_PASSPHRASE);
        return Ok(SecretString::from(value));
    }

    let interactive = std::io::stdin().is_terminal() && !no_input;
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No passphrase provided and no TTY available. Set {}.",
            ENV_PASSPHRASE
        ))
        .into());
    }

    let prompt = Password::new().with_prompt("Passphrase");
    let prompt = match purpose {
        Purpose::Encrypt => {
            prompt.with_confirmation("Confirm passphrase", "Passphrases do not match")
        }
        Purpose::Decrypt => prompt,
    };
    let value = prompt
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?;
    if value.is_empty() {
        return Err(CliError::invalid_input("Passphrase cannot be empty").into());
    }
    Ok(SecretString::from(value))
}

/// Pick the salt: `--salt`, then `VELLUM_SALT`, then `[encryption] salt`.
pub fn resolve_salt(flag: Option<&str>, config: &VellumConfig) -> anyhow::Result<String> {
    let from_env = non_blank_env(ENV_SALT);
    pick_salt(flag, from_env.as_deref(), config.encryption.salt.as_deref()).ok_or_else(|| {
        CliError::invalid_input(format!(
            "No salt provided. Use --salt, set {}, or add `salt` under [encryption] in the config file.",
            ENV_SALT
        ))
        .into()
    })
}

fn pick_salt(flag: Option<&str>, env: Option<&str>, config: Option<&str>) -> Option<String> {
    [flag, env, config]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
