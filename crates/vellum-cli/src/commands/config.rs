use crate::app::AppContext;
use crate::config::{write_config, VellumConfig};
use crate::errors::CliError;

pub fn handle_config_init(ctx: &AppContext, force: bool) -> anyhow::Result<()> {
    let path = &ctx.config_path;
    if vellum_core::fs::file_exists(path)? && !force {
        return Err(CliError::invalid_input(format!(
            "Config already exists: {} (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    write_config(path, &VellumConfig::default())?;
    tracing::info!(path = %path.display(), "wrote default config");
    if !ctx.quiet {
        println!("Wrote config to {}", path.display());
    }
    Ok(())
}

pub fn handle_config_show(ctx: &AppContext) -> anyhow::Result<()> {
    if !ctx.quiet {
        println!("# {}", ctx.config_path.display());
    }
    let contents =
        toml::to_string_pretty(&ctx.config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    print!("{}", contents);
    Ok(())
}
