//! Vellum CLI - passphrase-based file encryption
//!
//! This is the command-line interface for Vellum. It wraps the envelope
//! format from `vellum_core` with file, directory and pipe handling.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod passphrase;

use std::path::PathBuf;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, ConfigSubcommand};
use crate::commands::{config as config_cmd, crypt, misc};
use crate::constants::exit_codes;
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        if let Some(cli_err) = e.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_codes::GENERAL);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // Completions must work even with a broken config file.
    if let Commands::Completions(args) = &cli.command {
        return misc::handle_completions(args);
    }

    let ctx = AppContext::load(cli)?;
    let log_file = cli
        .log_file
        .as_deref()
        .or(ctx.config.logging.file.as_deref())
        .map(PathBuf::from);
    logging::init(cli.verbose, &ctx.config.logging.level, log_file.as_deref())?;
    tracing::debug!(config = %ctx.config_path.display(), "loaded configuration");

    match &cli.command {
        Commands::Encrypt(args) => crypt::handle_encrypt(&ctx, args),
        Commands::Decrypt(args) => crypt::handle_decrypt(&ctx, args),
        Commands::Config(ConfigSubcommand::Init { force }) => {
            config_cmd::handle_config_init(&ctx, *force)
        }
        Commands::Config(ConfigSubcommand::Show) => config_cmd::handle_config_show(&ctx),
        Commands::Completions(args) => misc::handle_completions(args),
    }
}
