use std::fs;
use std::path::Path;

use common::config::WorkerConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default log level when neither --log-level nor RUST_LOG is set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub worker: WorkerConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            worker: WorkerConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),
}

impl AppConfig {
    /// Load the config file if one was given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.level()?;
        Ok(config)
    }

    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_worker_section() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "debug"

            [worker]
            thread_name = "signer"
            max_queue_size = 64
            "#,
        )
        .unwrap();
        assert_eq!(config.level().unwrap(), tracing::Level::DEBUG);
        assert_eq!(config.worker.thread_name, "signer");
        assert_eq!(config.worker.max_queue_size, Some(64));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        assert!(matches!(
            AppConfig::from_toml(r#"log_level = "loud""#),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[worker]\nmax_queue_size = 2\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.worker.max_queue_size, Some(2));
        assert!(matches!(
            AppConfig::load(Some(&dir.path().join("missing.toml"))),
            Err(ConfigError::Io(_))
        ));
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }
}
