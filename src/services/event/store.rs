use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::event::EventRow;

/// Range query for event rows. Both bounds are inclusive calendar days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub user: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl EventFilter {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            user: None,
            start,
            end,
        }
    }

    pub fn for_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// Remote store holding one row per (event, attendee).
///
/// Requests are independent; there is no cross-request transaction and a
/// write is not guaranteed to be visible to an immediately following read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list(&self, filter: &EventFilter) -> Result<Vec<EventRow>>;

    async fn create(&self, row: EventRow) -> Result<EventRow>;

    async fn delete(&self, id: i64) -> Result<()>;
}
