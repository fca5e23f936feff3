use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::utils::date::parse_calendar_date;

/// Checks whether a column exists on a table.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let query = format!(
        "SELECT COUNT(*) FROM pragma_table_info('{}') WHERE name='{}'",
        table, column
    );

    let exists: i32 = conn
        .query_row(&query, [], |row| row.get(0))
        .context("Failed to inspect table info")?;

    Ok(exists > 0)
}

/// Adds a column if it does not already exist.
pub fn ensure_column(conn: &Connection, table: &str, column: &str, ddl: &str) -> Result<()> {
    if column_exists(conn, table, column)? {
        return Ok(());
    }

    conn.execute(ddl, [])
        .with_context(|| format!("Failed to add {}.{}", table, column))?;
    Ok(())
}

/// Fills the normalized `day` column for rows written before it existed.
/// Rows whose raw date cannot be parsed keep a NULL day.
pub fn backfill_event_days(conn: &Connection) -> Result<usize> {
    let pending: Vec<(i64, String)> = {
        let mut stmt = conn
            .prepare("SELECT id, date FROM events WHERE day IS NULL")
            .context("Failed to prepare day backfill query")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
    };

    let mut updated = 0;
    for (id, raw_date) in pending {
        if let Some(day) = parse_calendar_date(&raw_date) {
            conn.execute(
                "UPDATE events SET day = ?1 WHERE id = ?2",
                params![day.to_string(), id],
            )
            .with_context(|| format!("Failed to backfill day for event row {}", id))?;
            updated += 1;
        }
    }

    if updated > 0 {
        log::info!("Backfilled normalized day on {} event row(s)", updated);
    }
    Ok(updated)
}
