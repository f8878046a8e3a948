//! Runtime settings resolved from CLI flags, env vars and the config file.

use std::path::{Path, PathBuf};

use notekeeper_core::HashCost;

use crate::cli::Cli;
use crate::config::{
    default_config_path, default_database_path, default_key_file_path, read_config_or_default,
    NotekeeperConfig,
};

/// Effective settings for one invocation.
#[derive(Debug)]
pub struct Settings {
    pub config_path: PathBuf,
    pub database: PathBuf,
    pub key_file: PathBuf,
    pub hash_cost: HashCost,
    pub log_level: Option<String>,
}

/// Resolve the config file path from `--config` / NOTEKEEPER_CONFIG.
fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match cli.config.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => default_config_path(),
    }
}

impl Settings {
    /// Load settings. A missing config file means defaults.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = resolve_config_path(cli)?;
        let config = read_config_or_default(&config_path)?;
        Self::resolve(cli, config_path, config)
    }

    fn resolve(
        cli: &Cli,
        config_path: PathBuf,
        config: NotekeeperConfig,
    ) -> anyhow::Result<Self> {
        let database = match pick_path(cli.db.as_deref(), config.storage.database.as_deref()) {
            Some(path) => path,
            None => default_database_path()?,
        };
        let key_file = match pick_path(cli.key_file.as_deref(), config.storage.key_file.as_deref())
        {
            Some(path) => path,
            None => default_key_file_path()?,
        };

        Ok(Self {
            config_path,
            database,
            key_file,
            hash_cost: config.security.hash_cost(),
            log_level: config.log.level,
        })
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    pub fn key_file(&self) -> &Path {
        &self.key_file
    }
}

/// Flag (or env var) first, then the config file.
fn pick_path(flag: Option<&str>, configured: Option<&str>) -> Option<PathBuf> {
    let set = |value: &&str| !value.trim().is_empty();
    flag.filter(set).or(configured.filter(set)).map(PathBuf::from)
}
