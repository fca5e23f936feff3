// Hours ledger model
// One credit row per (attendee, event)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rows fetched per page while scanning the ledger.
pub const LEDGER_PAGE_SIZE: usize = 100;

/// A single hour credit awarded to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    pub id: Option<i64>,
    pub user: String,
    pub hours_amount: u32,
    pub cause: String,
    pub date_awarded: NaiveDate,
}

impl HoursEntry {
    pub fn new(
        user: impl Into<String>,
        hours_amount: u32,
        cause: impl Into<String>,
        date_awarded: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            user: user.into(),
            hours_amount,
            cause: cause.into(),
            date_awarded,
        }
    }

    pub fn matches(&self, filter: &HoursFilter) -> bool {
        self.user == filter.user
            && self.cause == filter.cause
            && self.date_awarded == filter.date_awarded
    }
}

/// The triple ledger entries are matched on when credits are revoked.
///
/// There is no link back to the originating event, so two events for the
/// same user with equal cause and date are indistinguishable here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HoursFilter {
    pub user: String,
    pub cause: String,
    pub date_awarded: NaiveDate,
}

impl HoursFilter {
    pub fn new(user: impl Into<String>, cause: impl Into<String>, date_awarded: NaiveDate) -> Self {
        Self {
            user: user.into(),
            cause: cause.into(),
            date_awarded,
        }
    }
}

/// Offset-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub fn first(limit: usize) -> Self {
        Self { limit, offset: 0 }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(LEDGER_PAGE_SIZE)
    }
}
