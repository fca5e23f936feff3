use rusqlite::types::Type;
use rusqlite::{self, Row};

use crate::models::category::EventCategory;
use crate::models::event::EventRow;

pub(crate) const EVENT_COLUMNS: &str = "id, date, name, category, start_time, end_time,
    certification, promotion, menu, venue, attendee_user, notes";

pub(crate) fn map_event_row(row: &Row<'_>) -> Result<EventRow, rusqlite::Error> {
    Ok(EventRow {
        id: Some(row.get(0)?),
        date: row.get(1)?,
        name: row.get(2)?,
        category: to_category(row.get::<_, String>(3)?, 3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        certification: row.get(6)?,
        promotion: row.get(7)?,
        menu: row.get(8)?,
        venue: row.get(9)?,
        attendee_user: row.get(10)?,
        notes: row.get(11)?,
    })
}

fn to_category(value: String, column: usize) -> Result<EventCategory, rusqlite::Error> {
    value
        .parse::<EventCategory>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
