//! Application context shared by all commands.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{load_config, resolve_config_path, VellumConfig};

/// Effective configuration plus global flags.
pub struct AppContext {
    pub config: VellumConfig,
    pub config_path: PathBuf,
    pub quiet: bool,
}

impl AppContext {
    /// Resolve and load the config file named by `--config`, `VELLUM_CONFIG`
    /// or the XDG default. A missing file yields defaults.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = resolve_config_path(cli.config.as_deref())?;
        let config = load_config(&config_path)?;
        Ok(Self {
            config,
            config_path,
            quiet: cli.quiet,
        })
    }
}
