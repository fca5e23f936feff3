use super::shared::{map_event_row, EVENT_COLUMNS};
use super::EventService;
use crate::models::event::EventRow;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{self, params};

impl<'a> EventService<'a> {
    /// List every row ordered by insertion.
    pub fn list_all(&self) -> Result<Vec<EventRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM events ORDER BY id ASC", EVENT_COLUMNS))?;

        let rows = stmt
            .query_map([], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Rows whose date falls within `start..=end`, optionally restricted to
    /// one attendee. Rows with an unparseable date never match a range.
    pub fn find_by_date_range(
        &self,
        user: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EventRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM events
                 WHERE day IS NOT NULL AND day >= ?1 AND day <= ?2
                   AND (?3 IS NULL OR attendee_user = ?3)
                 ORDER BY day ASC, id ASC",
                EVENT_COLUMNS
            ))
            .context("Failed to prepare event range query")?;

        let rows = stmt
            .query_map(
                params![start.to_string(), end.to_string(), user],
                map_event_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }
}
