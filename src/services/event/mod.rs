//! Calendar event service entry point.
//! Database-backed row operations, the async store seam, and the grouping
//! pass that turns stored rows into display events.

use rusqlite::Connection;

pub mod crud;
pub mod grouping;
pub mod queries;
mod shared;
pub mod store;

pub use grouping::{events_by_day, events_for_day};
pub use store::{EventFilter, EventStore};

/// Service for managing event rows stored in SQLite.
pub struct EventService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> EventService<'a> {
    /// Create a new EventService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
