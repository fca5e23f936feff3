// Settings module
// Persisted view preferences and file-based application configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::ui::ViewType;

/// View preferences stored in the single-row `settings` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub id: Option<i64>,
    /// Workweek policy: show Saturday and Sunday in grids.
    pub include_weekends: bool,
    pub current_view: ViewType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: Some(1),
            include_weekends: false,
            current_view: ViewType::Month,
        }
    }
}

/// Configuration read from `config.toml` in the platform config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file; defaults to `calendar.db` in the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Weekend policy forced by the config file. Unset defers to the
    /// stored setting.
    pub include_weekends: Option<bool>,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Load from an explicit file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {:?}", path))?;
        Self::from_toml(&content)
    }

    /// Load from the platform config directory.
    pub fn load() -> Result<Self> {
        let path = Self::default_config_path()?;
        Self::load_from(&path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Whether grids include weekends.
    ///
    /// An explicit request (a command-line flag) wins, then the config
    /// file, then the stored setting.
    pub fn weekend_policy(&self, requested: Option<bool>, stored: &Settings) -> bool {
        requested
            .or(self.include_weekends)
            .unwrap_or(stored.include_weekends)
    }

    /// Database path from the config, or the platform default.
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let data_dir = project_dirs()?.data_dir().to_path_buf();
        if !data_dir.exists() {
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
        }
        Ok(data_dir.join("calendar.db"))
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "roster", "roster-calendar")
        .context("Failed to determine platform directories")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.include_weekends);
        assert_eq!(settings.current_view, ViewType::Month);
    }

    #[test]
    fn test_config_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            database_path = "/tmp/roster.db"
            include_weekends = true
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/roster.db")));
        assert_eq!(config.include_weekends, Some(true));
    }

    #[test]
    fn test_config_empty_document_uses_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_toml() {
        assert!(AppConfig::from_toml("include_weekends = maybe").is_err());
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "include_weekends = true\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.include_weekends, Some(true));
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("events.db")),
            include_weekends: None,
        };
        assert_eq!(config.resolve_database_path().unwrap(), PathBuf::from("events.db"));
    }

    #[test]
    fn test_weekend_policy_defers_to_stored_setting() {
        let stored = Settings {
            include_weekends: true,
            ..Settings::default()
        };
        assert!(AppConfig::default().weekend_policy(None, &stored));
        assert!(!AppConfig::default().weekend_policy(None, &Settings::default()));
    }

    #[test]
    fn test_weekend_policy_config_overrides_stored() {
        let stored = Settings {
            include_weekends: true,
            ..Settings::default()
        };
        let config = AppConfig {
            include_weekends: Some(false),
            ..AppConfig::default()
        };
        assert!(!config.weekend_policy(None, &stored));
    }

    #[test]
    fn test_weekend_policy_request_can_turn_weekends_off() {
        let stored = Settings {
            include_weekends: true,
            ..Settings::default()
        };
        let config = AppConfig {
            include_weekends: Some(true),
            ..AppConfig::default()
        };
        assert!(!config.weekend_policy(Some(false), &stored));
        assert!(AppConfig::default().weekend_policy(Some(true), &Settings::default()));
    }
}
