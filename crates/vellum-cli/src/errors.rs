//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use vellum_core::VellumError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (input file, directory, config)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passphrase or salt, corrupted envelope)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Any other failure
    Other(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) | CliError::Other(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Wrap a core error, naming the file it came from.
    pub fn from_core(err: VellumError, context: &str) -> Self {
        match err {
            VellumError::InvalidPadding => CliError::auth_failed_with_hint(
                format!("Cannot decrypt {}: {}", context, err),
                "Hint: Wrong passphrase or salt, or the file is corrupted.",
            ),
            VellumError::InvalidData
            | VellumError::InvalidPassphrase
            | VellumError::InvalidSalt
            | VellumError::InvalidBlockSize => {
                CliError::invalid_input(format!("{}: {}", context, err))
            }
            VellumError::KeyDerivationFailed
            | VellumError::EncryptionFailed
            | VellumError::DecryptionFailed => CliError::Other(format!("{}: {}", context, err)),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Other(_) => exit_codes::GENERAL,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;

    #[test]
    fn test_padding_maps_to_auth_failed() {
        let err = CliError::from_core(VellumError::InvalidPadding, "notes.txt.vlm");
        assert_eq!(err.exit_code(), exit_codes::AUTH_FAILED);
        let text = err.to_string();
        assert!(text.contains("notes.txt.vlm"));
        assert!(text.contains("Wrong passphrase or salt"));
    }

    #[test]
    fn test_validation_maps_to_invalid_input() {
        for core in [
            VellumError::InvalidData,
            VellumError::InvalidPassphrase,
            VellumError::InvalidSalt,
        ] {
            let err = CliError::from_core(core, "input");
            assert_eq!(err.exit_code(), exit_codes::INVALID_INPUT);
        }
    }

    #[test]
    fn test_primitive_failures_are_general() {
        let err = CliError::from_core(VellumError::EncryptionFailed, "input");
        assert_eq!(err.exit_code(), exit_codes::GENERAL);
    }

    #[test]
    fn test_not_found_display_includes_hint() {
        let err = CliError::not_found("Input not found: a.txt", "Hint: check the path.");
        assert_eq!(err.to_string(), "Input not found: a.txt\nHint: check the path.");
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
    }
}
