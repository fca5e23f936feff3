//! Hour credit bookkeeping.
//!
//! `HoursService` is the SQLite-backed CRUD, `HoursLedger` the async seam the
//! reconciliation logic talks to, and `reconcile` keeps credits in step with
//! event creation and deletion.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::{self, params, Connection, Row};

use crate::models::hours::{HoursEntry, HoursFilter, Page};

pub mod ledger;
pub mod reconcile;

pub use ledger::HoursLedger;
pub use reconcile::{award_hours, revoke_hours, AttendeeFailure, HoursError};

/// Service for hour credit rows stored in SQLite.
pub struct HoursService<'a> {
    conn: &'a Connection,
}

impl<'a> HoursService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, mut entry: HoursEntry) -> Result<HoursEntry> {
        if entry.user.trim().is_empty() {
            return Err(anyhow!("Hours entry requires a user"));
        }

        self.conn
            .execute(
                "INSERT INTO hours_entries (user, hours_amount, cause, date_awarded)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    entry.user,
                    entry.hours_amount,
                    entry.cause,
                    entry.date_awarded.to_string(),
                ],
            )
            .context("Failed to insert hours entry")?;

        entry.id = Some(self.conn.last_insert_rowid());
        Ok(entry)
    }

    /// One page of entries matching `(user, cause, date_awarded)`, oldest first.
    pub fn find_matching(&self, filter: &HoursFilter, page: Page) -> Result<Vec<HoursEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, user, hours_amount, cause, date_awarded
                 FROM hours_entries
                 WHERE user = ?1 AND cause = ?2 AND date_awarded = ?3
                 ORDER BY id ASC
                 LIMIT ?4 OFFSET ?5",
            )
            .context("Failed to prepare hours query")?;

        let entries = stmt
            .query_map(
                params![
                    filter.user,
                    filter.cause,
                    filter.date_awarded.to_string(),
                    page.limit as i64,
                    page.offset as i64,
                ],
                map_hours_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    /// Sum of a user's credited hours.
    pub fn total_for_user(&self, user: &str) -> Result<u32> {
        let total: i64 = self
            .conn
            .query_row(
                "SELECT COALESCE(SUM(hours_amount), 0) FROM hours_entries WHERE user = ?1",
                [user],
                |row| row.get(0),
            )
            .context("Failed to total hours")?;

        Ok(total as u32)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM hours_entries WHERE id = ?1", [id])
            .context("Failed to delete hours entry")?;

        if rows_affected == 0 {
            return Err(anyhow!("Hours entry with id {} not found", id));
        }

        Ok(())
    }
}

fn map_hours_row(row: &Row<'_>) -> Result<HoursEntry, rusqlite::Error> {
    let date_awarded: String = row.get(4)?;
    let date_awarded = NaiveDate::parse_from_str(&date_awarded, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(HoursEntry {
        id: Some(row.get(0)?),
        user: row.get(1)?,
        hours_amount: row.get(2)?,
        cause: row.get(3)?,
        date_awarded,
    })
}
