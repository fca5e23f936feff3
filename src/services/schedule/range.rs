//! Guards against applying results for a range the user has already left.

use chrono::NaiveDate;

/// Identifies one visible-range request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeTicket {
    pub epoch: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Tracks the currently visible date range.
///
/// Each change of range bumps the epoch; a fetch started under an older
/// ticket is stale and its rows must be discarded.
#[derive(Debug, Default)]
pub struct RangeTracker {
    current: Option<RangeTicket>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `start..=end` the visible range and return its ticket.
    pub fn begin(&mut self, start: NaiveDate, end: NaiveDate) -> RangeTicket {
        let epoch = self.current.map_or(1, |ticket| ticket.epoch + 1);
        let ticket = RangeTicket { epoch, start, end };
        self.current = Some(ticket);
        ticket
    }

    pub fn current(&self) -> Option<RangeTicket> {
        self.current
    }

    pub fn is_current(&self, ticket: &RangeTicket) -> bool {
        self.current.as_ref() == Some(ticket)
    }

    /// Hand back `value` only if `ticket` is still current.
    pub fn accept<T>(&self, ticket: &RangeTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            log::debug!(
                "Dropping stale result for {}..{} (epoch {})",
                ticket.start,
                ticket.end,
                ticket.epoch
            );
            None
        }
    }
}
