use crate::models::settings::Settings;
use crate::services::database::Database;
use anyhow::{Context, Result};

use super::mapper::row_to_settings;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<Settings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT id, include_weekends, current_view FROM settings WHERE id = 1",
                [],
                row_to_settings,
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        let conn = self.db.connection();

        conn.execute(
            "UPDATE settings \
             SET include_weekends = ?1, \
                 current_view = ?2, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1",
            (
                settings.include_weekends as i32,
                settings.current_view.as_str(),
            ),
        )
        .context("Failed to update settings")?;

        log::info!(
            "Saved settings: view={}, include_weekends={}",
            settings.current_view,
            settings.include_weekends
        );
        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        let default_settings = Settings::default();
        self.update(&default_settings)
    }
}
