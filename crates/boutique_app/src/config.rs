use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use boutique_core::DEFAULT_PAGE_SIZE;
use boutique_engine::{CatalogSettings, DEFAULT_BASE_URL};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "boutique.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Driver configuration, read from `boutique.ron`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub page_size: u32,
    pub log_level: String,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: "info".to_string(),
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Falls back to `Info` for unknown level names.
    pub fn level(&self) -> LevelFilter {
        boutique_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let settings = CatalogSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            max_bytes: settings.max_bytes,
        }
    }
}

impl CatalogConfig {
    pub fn to_settings(&self) -> CatalogSettings {
        CatalogSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
        }
    }
}

/// Loads the configuration at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.catalog.to_settings().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                catalog: (base_url: "http://localhost:3000", request_timeout_secs: 5),
                page_size: 4,
                log_destination: Both,
            )"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.page_size, 4);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.level(), LevelFilter::Info);

        let settings = config.catalog.to_settings();
        assert_eq!(settings.base_url, "http://localhost:3000");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "(page_size: \"many\")").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.level(), LevelFilter::Info);

        let config = AppConfig {
            log_level: "Debug".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.level(), LevelFilter::Debug);
    }
}
