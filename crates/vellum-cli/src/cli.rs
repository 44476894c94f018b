use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use vellum_core::VERSION;

/// Vellum - passphrase-based file encryption (PBKDF2 + AES-256-CBC)
#[derive(Parser)]
#[command(name = "vellum")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: $VELLUM_CONFIG, then the XDG path)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<String>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a file, a directory of files, or stdin
    Encrypt(CryptArgs),

    /// Decrypt a file, a directory of files, or stdin
    Decrypt(CryptArgs),

    /// Manage the config file
    #[command(subcommand)]
    Config(ConfigSubcommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments shared by `encrypt` and `decrypt`
#[derive(Args)]
pub struct CryptArgs {
    /// Input file or directory (`-` for stdin)
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Output file or directory (`-` for stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Salt for key derivation (overrides VELLUM_SALT and config)
    #[arg(long)]
    pub salt: Option<String>,

    /// Envelopes as base64 text (encrypt writes it, decrypt reads it)
    #[arg(long)]
    pub base64: bool,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,

    /// Fail instead of prompting for a passphrase (always on for stdin input)
    #[arg(long)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encrypt() {
        let cli = Cli::try_parse_from([
            "vellum", "encrypt", "notes.txt", "-o", "out.vlm", "--salt", "s", "--base64",
        ])
        .unwrap();
        match cli.command {
            Commands::Encrypt(args) => {
                assert_eq!(args.input, "notes.txt");
                assert_eq!(args.output.as_deref(), Some("out.vlm"));
                assert_eq!(args.salt.as_deref(), Some("s"));
                assert!(args.base64);
                assert!(!args.force);
            }
            _ => panic!("expected encrypt"),
        }
    }

    #[test]
    fn test_config_flag_has_no_env_binding() {
        let cmd = Cli::command();
        let config = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .unwrap();
        assert!(config.get_env().is_none());
    }

    #[test]
    fn test_parse_no_input() {
        let cli = Cli::try_parse_from(["vellum", "decrypt", "a.vlm", "--no-input"]).unwrap();
        match cli.command {
            Commands::Decrypt(args) => assert!(args.no_input),
            _ => panic!("expected decrypt"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vellum", "decrypt", "a.vlm", "-v", "-q"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.quiet);
    }
}
