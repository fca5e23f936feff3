//! Local SQLite implementation of the event store and the hours ledger.

use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::event::EventRow;
use crate::models::hours::{HoursEntry, HoursFilter, Page};
use crate::services::database::Database;
use crate::services::event::{EventFilter, EventService, EventStore};
use crate::services::hours::{HoursLedger, HoursService};

/// Serves both collaborator traits from one SQLite database.
///
/// Each request takes the connection lock for the duration of a single
/// statement, so requests from concurrent tasks interleave but never
/// overlap.
pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    /// Wrap an opened database, creating tables if needed.
    pub fn new(db: Database) -> Result<Self> {
        db.initialize_schema()?;
        Ok(Self { db: Mutex::new(db) })
    }

    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> Result<Self> {
        log::info!("Opening calendar database at {}", path);
        Self::new(Database::new(path)?)
    }

    /// Fresh in-memory store, handy for tests and dry runs.
    pub fn in_memory() -> Result<Self> {
        Self::new(Database::new(":memory:")?)
    }

    /// Run `f` with exclusive access to the database.
    pub fn with_db<T>(&self, f: impl FnOnce(&Database) -> Result<T>) -> Result<T> {
        let db = self.lock()?;
        f(&db)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|_| anyhow!("Calendar database lock poisoned"))
    }
}

#[async_trait]
impl EventStore for SqliteStore {
    async fn list(&self, filter: &EventFilter) -> Result<Vec<EventRow>> {
        let db = self.lock()?;
        EventService::new(db.connection()).find_by_date_range(
            filter.user.as_deref(),
            filter.start,
            filter.end,
        )
    }

    async fn create(&self, row: EventRow) -> Result<EventRow> {
        let db = self.lock()?;
        EventService::new(db.connection()).create(row)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let db = self.lock()?;
        EventService::new(db.connection()).delete(id)
    }
}

#[async_trait]
impl HoursLedger for SqliteStore {
    async fn list(&self, filter: &HoursFilter, page: Page) -> Result<Vec<HoursEntry>> {
        let db = self.lock()?;
        HoursService::new(db.connection()).find_matching(filter, page)
    }

    async fn create(&self, entry: HoursEntry) -> Result<HoursEntry> {
        let db = self.lock()?;
        HoursService::new(db.connection()).create(entry)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let db = self.lock()?;
        HoursService::new(db.connection()).delete(id)
    }
}
