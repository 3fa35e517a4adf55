use crate::model::User;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn default_notification_secs() -> u64 {
    4
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the question bank JSON document
    pub data_file: String,
    #[serde(default)]
    pub user: User,
    /// How long a notification stays in the status bar
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    /// tracing filter used when RUST_LOG is not set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_file = Self::config_dir()
            .map(|dir| dir.join("bank.json"))
            .unwrap_or_else(|| PathBuf::from("bank.json"));
        Self {
            data_file: data_file.to_string_lossy().to_string(),
            user: User::default(),
            notification_secs: default_notification_secs(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".question-bank"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config, writing the defaults on first start
    ///
    /// An existing file that cannot be read or parsed is an error and is
    /// left untouched.
    pub fn load_or_init() -> Result<Config> {
        match Self::config_path() {
            Some(path) => Self::load_or_init_at(&path),
            None => Ok(Config::default()),
        }
    }

    fn load_or_init_at(path: &Path) -> Result<Config> {
        if let Some(config) = Self::load_from(path)? {
            return Ok(config);
        }
        let config = Config::default();
        // A read-only home still gets a working session
        if let Err(e) = config.save_to(path) {
            tracing::warn!(error = ?e, "could not write default config");
        }
        Ok(config)
    }

    /// `None` when the file does not exist yet
    fn load_from(path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(Some(config))
    }

    /// Save the config to disk
    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_file)
    }

    pub fn notification_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notification_secs as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::UserRole;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_file":"/tmp/bank.json"}"#).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/tmp/bank.json"));
        assert_eq!(config.notification_secs, 4);
        assert_eq!(config.user.role, Some(UserRole::Admin));
        assert!(config.log_filter.is_none());
        assert_eq!(config.notification_ttl(), chrono::Duration::seconds(4));
    }

    #[test]
    fn test_first_start_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".question-bank").join("config.json");

        let config = Config::load_or_init_at(&path).unwrap();
        assert_eq!(config.notification_secs, 4);
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(reloaded.data_file, config.data_file);
    }

    #[test]
    fn test_existing_config_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"data_file":"/srv/quiz/bank.json","notification_secs":9}"#).unwrap();

        let config = Config::load_or_init_at(&path).unwrap();
        assert_eq!(config.data_file, "/srv/quiz/bank.json");
        assert_eq!(config.notification_secs, 9);
    }

    #[test]
    fn test_invalid_config_is_an_error_and_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let contents = r#"{"data_file":"/srv/quiz/bank.json","notification_secs":"ten"}"#;
        fs::write(&path, contents).unwrap();

        let err = Config::load_or_init_at(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }
}
