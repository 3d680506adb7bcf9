//! Dashboard configuration persistence
//!
//! Stored in `<config_dir>/actboard/config.json`. Command-line flags and
//! environment variables are applied on top by the binary.

use crate::error::CoreError;
use crate::models::Month;
use crate::provider::JsonDirProvider;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

/// Upper bound for the fetch retry count
const MAX_FETCH_RETRIES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Directory holding `<month>.json` files
    pub data_dir: Option<PathBuf>,
    /// Month shown at startup instead of the current one
    pub default_month: Option<Month>,
    pub fetch_retries: u32,
    pub fetch_retry_delay_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_month: None,
            fetch_retries: 3,
            fetch_retry_delay_ms: 100,
        }
    }
}

impl DashboardConfig {
    /// `<config_dir>/actboard`, if the platform has a config directory
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("actboard"))
    }

    /// Load from `<dir>/config.json`.
    /// Returns defaults on any I/O or parse error.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist to `<dir>/config.json`
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).context("Failed to create config directory")?;
        let path = dir.join(CONFIG_FILE);
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.fetch_retries > MAX_FETCH_RETRIES {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "fetchRetries is {}, maximum is {}",
                    self.fetch_retries, MAX_FETCH_RETRIES
                ),
            });
        }
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(CoreError::InvalidConfig {
                    message: "dataDir is empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Data directory, falling back to `<data_dir>/actboard`, then `./data`
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("actboard")))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_retry_delay_ms)
    }

    /// Provider reading from the resolved data directory
    pub fn json_provider(&self) -> JsonDirProvider {
        JsonDirProvider::new(self.resolved_data_dir())
            .with_retries(self.fetch_retries, self.retry_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(DashboardConfig::load(dir.path()), DashboardConfig::default());
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "not json").unwrap();
        assert_eq!(DashboardConfig::load(dir.path()), DashboardConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("actboard");
        let config = DashboardConfig {
            data_dir: Some(PathBuf::from("/srv/activation")),
            default_month: Some(Month::May),
            fetch_retries: 5,
            fetch_retry_delay_ms: 250,
        };
        config.save(&nested).unwrap();

        let loaded = DashboardConfig::load(&nested);
        assert_eq!(loaded, config);
        assert_eq!(loaded.retry_delay(), Duration::from_millis(250));
        assert_eq!(loaded.resolved_data_dir(), PathBuf::from("/srv/activation"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{"defaultMonth": "June"}"#).unwrap();

        let config = DashboardConfig::load(dir.path());
        assert_eq!(config.default_month, Some(Month::June));
        assert_eq!(config.fetch_retries, 3);
    }

    #[test]
    fn test_validate() {
        assert!(DashboardConfig::default().validate().is_ok());

        let config = DashboardConfig {
            fetch_retries: 99,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig { .. })));
    }
}
