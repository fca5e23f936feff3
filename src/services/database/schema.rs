use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    insert_default_settings(conn)?;
    create_events_table(conn)?;
    run_events_migrations(conn)?;
    create_hours_table(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            include_weekends INTEGER NOT NULL DEFAULT 0,
            current_view TEXT NOT NULL DEFAULT 'Month',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id, include_weekends, current_view)
         VALUES (1, 0, 'Month')",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}

/// One row per (event, attendee). `date`, `start_time` and `end_time` keep
/// the raw text; `day` is the parsed ISO date used for range queries.
fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            day TEXT,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            start_time TEXT,
            end_time TEXT,
            certification TEXT,
            promotion TEXT,
            menu TEXT,
            venue TEXT,
            attendee_user TEXT,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create events table")?;

    Ok(())
}

fn run_events_migrations(conn: &Connection) -> Result<()> {
    for (column, ddl) in [
        ("day", "ALTER TABLE events ADD COLUMN day TEXT"),
        ("start_time", "ALTER TABLE events ADD COLUMN start_time TEXT"),
        ("end_time", "ALTER TABLE events ADD COLUMN end_time TEXT"),
        ("certification", "ALTER TABLE events ADD COLUMN certification TEXT"),
        ("promotion", "ALTER TABLE events ADD COLUMN promotion TEXT"),
        ("menu", "ALTER TABLE events ADD COLUMN menu TEXT"),
        ("venue", "ALTER TABLE events ADD COLUMN venue TEXT"),
        ("attendee_user", "ALTER TABLE events ADD COLUMN attendee_user TEXT"),
        ("notes", "ALTER TABLE events ADD COLUMN notes TEXT"),
    ] {
        migrations::ensure_column(conn, "events", column, ddl)?;
    }

    migrations::backfill_event_days(conn)?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_day ON events(day)",
        [],
    )
    .context("Failed to create events day index")?;

    Ok(())
}

fn create_hours_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS hours_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user TEXT NOT NULL,
            hours_amount INTEGER NOT NULL,
            cause TEXT NOT NULL,
            date_awarded TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create hours_entries table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_hours_match
         ON hours_entries(user, cause, date_awarded)",
        [],
    )
    .context("Failed to create hours_entries index")?;

    Ok(())
}
