//! Keeps hour credits in step with event creation and deletion.
//!
//! Every attendee is handled by its own request chain. All chains are started
//! together and joined; once every chain has finished, any failures are
//! reported together. Chains that succeeded are not rolled back, so a failed
//! call can leave the ledger partially updated.

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use futures::future::join_all;
use thiserror::Error;

use super::HoursLedger;
use crate::models::category::EventCategory;
use crate::models::hours::{HoursEntry, HoursFilter, Page, LEDGER_PAGE_SIZE};

/// One attendee whose ledger operation failed.
#[derive(Debug)]
pub struct AttendeeFailure {
    pub user: String,
    pub error: anyhow::Error,
}

#[derive(Debug, Error)]
pub enum HoursError {
    /// Some attendees failed; the others were applied and stay applied.
    #[error(
        "{} of {total} attendee ledger operations failed ({completed} applied): {}",
        .failures.len(),
        describe(.failures)
    )]
    Partial {
        total: usize,
        completed: usize,
        failures: Vec<AttendeeFailure>,
    },
}

impl HoursError {
    pub fn failures(&self) -> &[AttendeeFailure] {
        match self {
            Self::Partial { failures, .. } => failures,
        }
    }
}

fn describe(failures: &[AttendeeFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{}: {:#}", failure.user, failure.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Credit every attendee of an hour-generating event.
///
/// Returns the number of entries created. A non-hour-generating category is
/// a no-op. Duplicate attendees in the list are credited once per mention.
pub async fn award_hours<L>(
    ledger: &L,
    attendees: &[String],
    category: EventCategory,
    cause: &str,
    date_awarded: NaiveDate,
) -> Result<usize, HoursError>
where
    L: HoursLedger + ?Sized,
{
    if !category.is_hour_generating() {
        log::debug!("{} events earn no hours, skipping award", category);
        return Ok(0);
    }

    let amount = category.hours_per_attendee();
    let requests = attendees.iter().map(|user| async move {
        let entry = HoursEntry::new(user.clone(), amount, cause, date_awarded);
        ledger
            .create(entry)
            .await
            .with_context(|| format!("Failed to award hours to {}", user))
            .map(|_| 1)
    });

    let outcome = join_all(requests).await;
    let created = aggregate(attendees, outcome)?;

    log::info!(
        "Awarded {} hours to {} attendee(s) for {:?} on {}",
        amount,
        created,
        cause,
        date_awarded
    );
    Ok(created)
}

/// Remove the credits created for an event from every attendee.
///
/// Entries are matched on `(user, cause, date_awarded)` only. Returns the
/// number of entries deleted. A non-hour-generating category is a no-op.
pub async fn revoke_hours<L>(
    ledger: &L,
    attendees: &[String],
    category: EventCategory,
    cause: &str,
    date_awarded: NaiveDate,
) -> Result<usize, HoursError>
where
    L: HoursLedger + ?Sized,
{
    if !category.is_hour_generating() {
        log::debug!("{} events earn no hours, skipping revoke", category);
        return Ok(0);
    }

    let scans = attendees
        .iter()
        .map(|user| drain_matching(ledger, HoursFilter::new(user.clone(), cause, date_awarded)));

    let outcome = join_all(scans).await;
    let deleted = aggregate(attendees, outcome)?;

    log::info!(
        "Revoked {} hours entr{} for {:?} on {}",
        deleted,
        if deleted == 1 { "y" } else { "ies" },
        cause,
        date_awarded
    );
    Ok(deleted)
}

/// Delete every entry matching `filter`, a page at a time.
///
/// Each page is read from offset zero because everything on the previous
/// page has been deleted. The scan stops at the first short page. An entry
/// that does not match the filter aborts the scan before anything else on
/// its page is deleted. If the
/// store keeps returning full pages (for example under concurrent inserts)
/// the scan keeps going.
async fn drain_matching<L>(ledger: &L, filter: HoursFilter) -> anyhow::Result<usize>
where
    L: HoursLedger + ?Sized,
{
    let mut deleted = 0;
    loop {
        let page = ledger
            .list(&filter, Page::first(LEDGER_PAGE_SIZE))
            .await
            .with_context(|| format!("Failed to list hours for {}", filter.user))?;
        let fetched = page.len();

        for entry in page {
            if !entry.matches(&filter) {
                bail!(
                    "Ledger returned an entry outside the filter for {}: {:?} on {}",
                    filter.user,
                    entry.cause,
                    entry.date_awarded
                );
            }
            let id = entry
                .id
                .ok_or_else(|| anyhow!("Ledger returned an entry without id for {}", filter.user))?;
            ledger
                .delete(id)
                .await
                .with_context(|| format!("Failed to delete hours entry {} for {}", id, filter.user))?;
            deleted += 1;
        }

        log::debug!("Hours scan for {}: {} matched on this page", filter.user, fetched);
        if fetched < LEDGER_PAGE_SIZE {
            break;
        }
    }
    Ok(deleted)
}

fn aggregate(
    attendees: &[String],
    outcome: Vec<anyhow::Result<usize>>,
) -> Result<usize, HoursError> {
    let mut applied = 0;
    let mut completed = 0;
    let mut failures = Vec::new();

    for (user, result) in attendees.iter().zip(outcome) {
        match result {
            Ok(count) => {
                applied += count;
                completed += 1;
            }
            Err(error) => {
                log::warn!("Ledger operation failed for {}: {:#}", user, error);
                failures.push(AttendeeFailure {
                    user: user.clone(),
                    error,
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(applied)
    } else {
        Err(HoursError::Partial {
            total: attendees.len(),
            completed,
            failures,
        })
    }
}
