//! Constants used throughout the CLI.

/// Environment variable holding the passphrase (skips the prompt).
pub const ENV_PASSPHRASE: &str = "VELLUM_PASSPHRASE";

/// Environment variable holding the salt.
pub const ENV_SALT: &str = "VELLUM_SALT";

/// Environment variable overriding the config file path.
pub const ENV_CONFIG: &str = "VELLUM_CONFIG";

/// Environment variable holding a tracing filter directive.
pub const ENV_LOG: &str = "VELLUM_LOG";

/// Default extension for encrypted files.
pub const DEFAULT_EXTENSION: &str = "vlm";

/// Default log level when neither `VELLUM_LOG` nor `--verbose` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, also clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (input file, directory, config).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase or salt, corrupted envelope).
    pub const AUTH_FAILED: i32 = 5;
}
