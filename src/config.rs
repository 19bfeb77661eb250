use crate::error::AppError;
use crate::storage;
use photo_session::filter::DEFAULT_BLUR_RADIUS;
use photo_session::source::mars::MARS_BASE_URL;
use photo_session::source::picsum::PICSUM_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Database the app was originally deployed against
pub const DEFAULT_DATABASE_URL: &str =
    "https://marsphotoscm-default-rtdb.europe-west1.firebasedatabase.app";

/// Which persistence store backs the sessions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Realtime,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseSettings {
    pub backend: StoreBackend,
    pub url: String,
    pub auth_token: Option<String>,
    /// Relative to the app directory unless absolute
    pub sqlite_file: String,
    pub timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Realtime,
            url: DEFAULT_DATABASE_URL.to_string(),
            auth_token: None,
            sqlite_file: "marsphotos.db".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceSettings {
    pub mars_base_url: String,
    pub picsum_base_url: String,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            mars_base_url: MARS_BASE_URL.to_string(),
            picsum_base_url: PICSUM_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterSettings {
    pub blur_radius: u8,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            blur_radius: DEFAULT_BLUR_RADIUS,
        }
    }
}

/// App configuration, read from `marsphotos.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub sources: SourceSettings,
    pub filters: FilterSettings,
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }
}

/// Loads the config file; a missing file yields the defaults
pub fn load_config_from(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let text = std::fs::read_to_string(path)?;
    let config = AppConfig::from_toml(&text)?;
    log::info!(
        "Loaded config from {} (store backend: {:?})",
        path.display(),
        config.database.backend
    );
    Ok(config)
}

/// Loads the config from the default location
pub fn load_config() -> Result<AppConfig, AppError> {
    let path = storage::get_config_path()?;
    load_config_from(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database.backend, StoreBackend::Realtime);
        assert_eq!(config.filters.blur_radius, 10);
    }

    #[test]
    fn test_partial_file() {
        let config = AppConfig::from_toml(
            r#"
            [database]
            backend = "sqlite"
            sqlite_file = "/tmp/photos.db"

            [filters]
            blur_radius = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.database.backend, StoreBackend::Sqlite);
        assert_eq!(config.database.sqlite_file, "/tmp/photos.db");
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.sources.picsum_base_url, "https://picsum.photos");
        assert_eq!(config.filters.blur_radius, 4);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = AppConfig::from_toml("[database]\nbackend = \"postgres\"\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("marsphotos-does-not-exist.toml");
        let config = load_config_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
