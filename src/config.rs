//! Application configuration
//!
//! Settings are read from `~/.adledger/config.toml` when present. Every key
//! is optional; a missing file means defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_PREFIX: &str = "FB_Ads";
pub const DEFAULT_AUTHOR: &str = "FB Ads Manager";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQLite database location (defaults to ~/.adledger/data.db)
    pub db_path: Option<PathBuf>,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub file_prefix: String,
    pub output_dir: Option<PathBuf>,
    pub author: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            output_dir: None,
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

/// The per-user application directory (~/.adledger), created on demand
pub fn app_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let dir = PathBuf::from(home).join(".adledger");

    std::fs::create_dir_all(&dir).context("Failed to create .adledger directory")?;

    Ok(dir)
}

impl Config {
    /// Load the user's config file, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let path = app_dir()?.join("config.toml");
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {:?}", path))?;
        Self::parse(&raw).context(format!("Invalid config file {:?}", path))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => crate::db::get_default_db_path(),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.export.file_prefix, "FB_Ads");
        assert_eq!(config.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_partial_export_section() {
        let config = Config::parse(
            r#"
            db_path = "/tmp/ledger.db"

            [export]
            file_prefix = "Ads"
            "#,
        )
        .unwrap();
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/ledger.db"));
        assert_eq!(config.export.file_prefix, "Ads");
        assert_eq!(config.export.author, DEFAULT_AUTHOR);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::parse("tax_rate = 0.2").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "export = 3").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
