use super::shared::{map_event_row, EVENT_COLUMNS};
use super::EventService;
use crate::models::event::EventRow;
use anyhow::{anyhow, Context, Result};
use rusqlite::{self, params};

impl<'a> EventService<'a> {
    /// Insert one event row and return it with its new id.
    pub fn create(&self, mut row: EventRow) -> Result<EventRow> {
        if row.name.trim().is_empty() {
            return Err(anyhow!("Event name cannot be empty"));
        }

        let day = row.calendar_date().map(|date| date.to_string());

        self.conn
            .execute(
                "INSERT INTO events (
                    date, day, name, category, start_time, end_time, certification,
                    promotion, menu, venue, attendee_user, notes
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    row.date,
                    day,
                    row.name,
                    row.category.label(),
                    row.start_time,
                    row.end_time,
                    row.certification,
                    row.promotion,
                    row.menu,
                    row.venue,
                    row.attendee_user,
                    row.notes,
                ],
            )
            .context("Failed to insert event row")?;

        row.id = Some(self.conn.last_insert_rowid());
        Ok(row)
    }

    /// Retrieve a row by ID.
    pub fn get(&self, id: i64) -> Result<Option<EventRow>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS),
            [id],
            map_event_row,
        );

        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a row by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id])
            .context("Failed to delete event row")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event row with id {} not found", id));
        }

        Ok(())
    }
}
