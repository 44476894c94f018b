use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXTENSION, DEFAULT_LOG_LEVEL, ENV_CONFIG};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VellumConfig {
    #[serde(default)]
    pub encryption: EncryptionSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EncryptionSection {
    /// Default salt when neither `--salt` nor `VELLUM_SALT` is given
    pub salt: Option<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file: Option<String>,
}

impl Default for EncryptionSection {
    fn default() -> Self {
        Self {
            salt: None,
            extension: default_extension(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl VellumConfig {
    /// Extension with any leading dot removed.
    pub fn extension(&self) -> &str {
        self.encryption.extension.trim_start_matches('.')
    }
}

/// Resolve the config file path: `--config`, then `VELLUM_CONFIG`, then XDG.
pub fn resolve_config_path(flag: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(value) = flag.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(value));
    }
    if let Ok(value) = std::env::var(ENV_CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Load the config at `path`, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<VellumConfig> {
    if !vellum_core::fs::file_exists(path)? {
        return Ok(VellumConfig::default());
    }
    read_config(path)
}

pub fn read_config(path: &Path) -> anyhow::Result<VellumConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &VellumConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        vellum_core::fs::mkdir_if_not_exists(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("vellum"));
        }
    }
    Ok(home_dir()?.join(".config").join("vellum"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert!(config.encryption.salt.is_none());
        assert_eq!(config.extension(), "vlm");
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[encryption]\nsalt = \"team-salt\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.encryption.salt.as_deref(), Some("team-salt"));
        assert_eq!(config.extension(), "vlm");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = VellumConfig::default();
        config.encryption.extension = ".enc".to_string();
        config.logging.file = Some("/tmp/vellum.log".to_string());

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.extension(), "enc");
        assert_eq!(loaded.logging.file.as_deref(), Some("/tmp/vellum.log"));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[encryption\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_flag_wins_over_default() {
        let path = resolve_config_path(Some("/etc/vellum.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/etc/vellum.toml"));
    }
}
