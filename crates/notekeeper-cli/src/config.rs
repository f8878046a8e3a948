use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use notekeeper_core::HashCost;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NotekeeperConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub security: SecuritySection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub database: Option<String>,
    pub key_file: Option<String>,
}

/// Argon2id cost for newly hashed passwords.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
}

impl Default for SecuritySection {
    fn default() -> Self {
        let cost = HashCost::default();
        Self {
            hash_memory_kib: cost.memory_kib,
            hash_iterations: cost.iterations,
            hash_parallelism: cost.parallelism,
        }
    }
}

impl SecuritySection {
    pub fn hash_cost(&self) -> HashCost {
        HashCost {
            memory_kib: self.hash_memory_kib,
            iterations: self.hash_iterations,
            parallelism: self.hash_parallelism,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LogSection {
    /// `tracing` filter directive, e.g. `warn` or `notekeeper_core=debug`
    pub level: Option<String>,
}

impl NotekeeperConfig {
    pub fn new(database: PathBuf, key_file: PathBuf) -> Self {
        Self {
            storage: StorageSection {
                database: Some(database.to_string_lossy().to_string()),
                key_file: Some(key_file.to_string_lossy().to_string()),
            },
            security: SecuritySection::default(),
            log: LogSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_database_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("notes.db"))
}

pub fn default_key_file_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("notes.key"))
}

pub fn read_config(path: &Path) -> anyhow::Result<NotekeeperConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config if it exists, otherwise fall back to defaults.
pub fn read_config_or_default(path: &Path) -> anyhow::Result<NotekeeperConfig> {
    if path.exists() {
        read_config(path)
    } else {
        Ok(NotekeeperConfig::default())
    }
}

pub fn write_config(path: &Path, config: &NotekeeperConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    notekeeper_core::fs::write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notekeeper"));
        }
    }
    Ok(home_dir()?.join(".config").join("notekeeper"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notekeeper"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("notekeeper"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: NotekeeperConfig = toml::from_str(
            r#"
            [security]
            hash_iterations = 1
            "#,
        )
        .unwrap();

        assert!(config.storage.database.is_none());
        assert_eq!(config.security.hash_iterations, 1);
        assert_eq!(
            config.security.hash_memory_kib,
            HashCost::default().memory_kib
        );
        assert!(config.log.level.is_none());
    }

    #[test]
    fn test_write_then_read_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = NotekeeperConfig::new(dir.path().join("a.db"), dir.path().join("a.key"));
        config.log.level = Some("debug".to_string());

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.storage.database, config.storage.database);
        assert_eq!(loaded.storage.key_file, config.storage.key_file);
        assert_eq!(loaded.log.level.as_deref(), Some("debug"));
        assert_eq!(loaded.security.hash_cost(), HashCost::default());
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config_or_default(&dir.path().join("absent.toml")).unwrap();
        assert!(config.storage.key_file.is_none());
    }

    #[test]
    fn test_unparseable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
