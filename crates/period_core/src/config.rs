//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/period_tracker/config.toml`.
//! Every field has a default, so a missing file or a partial file is valid.

use crate::logging::default_log_level;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "period_tracker";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default database file name.
pub const DB_FILE_NAME: &str = "period_tracker.db";

/// Configuration load/save failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data storage configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// File logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_dir: default_log_dir(),
        }
    }
}

fn data_home() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

fn default_db_path() -> PathBuf {
    data_home().join(DB_FILE_NAME)
}

fn default_log_dir() -> PathBuf {
    data_home().join("logs")
}

fn default_level() -> String {
    default_log_level().to_string()
}

impl Config {
    /// Loads configuration from the standard config path, or defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        info!("event=config_load module=config status=ok path={}", path.display());
        Ok(config)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Saves the configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DB_FILE_NAME};

    #[test]
    fn default_paths_share_the_app_directory() {
        let config = Config::default();
        assert!(config.data.db_path.ends_with(DB_FILE_NAME));
        assert_eq!(
            config.data.db_path.parent(),
            config.logging.log_dir.parent()
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let toml_str = r#"
[data]
db_path = "/tmp/custom.db"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data.db_path.to_str(), Some("/tmp/custom.db"));
        assert_eq!(config.logging, Config::default().logging);
    }

    #[test]
    fn save_then_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.logging.level = "warn".to_string();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
