//! Event scheduling on top of the event store and the hours ledger.
//!
//! Every operation takes the caller's `Session` explicitly; only privileged
//! roles may change events. Mutations touch the two stores independently and
//! never roll back, so a failure can leave rows and credits out of step.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use futures::future::join_all;
use thiserror::Error;

use crate::models::event::{DisplayEvent, EventDraft, EventRow};
use crate::models::session::{Role, Session};
use crate::services::event::{events_by_day, EventFilter, EventStore};
use crate::services::hours::{award_hours, revoke_hours, HoursError, HoursLedger};
use crate::utils::date::parse_calendar_date;

pub mod range;

pub use range::{RangeTicket, RangeTracker};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{user} ({role}) is not allowed to {action} events")]
    Forbidden {
        user: String,
        role: Role,
        action: &'static str,
    },
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
    #[error(transparent)]
    Hours(#[from] HoursError),
}

pub struct ScheduleService<'a, S: ?Sized, L: ?Sized> {
    events: &'a S,
    ledger: &'a L,
}

impl<'a, S, L> ScheduleService<'a, S, L>
where
    S: EventStore + ?Sized,
    L: HoursLedger + ?Sized,
{
    pub fn new(events: &'a S, ledger: &'a L) -> Self {
        Self { events, ledger }
    }

    /// Rows dated within `start..=end` that the session may see.
    /// Participants only see their own rows.
    pub async fn load_range(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EventRow>, ScheduleError> {
        let mut filter = EventFilter::range(start, end);
        if !session.can_manage_events() {
            filter = filter.for_user(session.user.clone());
        }

        let rows = self.events.list(&filter).await?;
        log::debug!("Loaded {} event row(s) for {}..{}", rows.len(), start, end);
        Ok(rows)
    }

    /// Grouped display events per day for `start..=end`.
    pub async fn load_days(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, Vec<DisplayEvent>>, ScheduleError> {
        let rows = self.load_range(session, start, end).await?;
        Ok(events_by_day(&rows, start, end))
    }

    /// Store one row per attendee, then credit the attendees whose rows
    /// were written.
    pub async fn create_event(
        &self,
        session: &Session,
        draft: &EventDraft,
    ) -> Result<Vec<EventRow>, ScheduleError> {
        require_privileged(session, "create")?;
        let day = validated_day(draft)?;

        let rows = draft.to_rows();
        let total = rows.len();
        let outcome = join_all(rows.into_iter().map(|row| self.events.create(row))).await;

        let mut created = Vec::with_capacity(total);
        let mut first_error = None;
        for result in outcome {
            match result {
                Ok(row) => created.push(row),
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }

        let attendees: Vec<String> = created
            .iter()
            .filter_map(|row| row.attendee_user.clone())
            .collect();
        let awarded = award_hours(self.ledger, &attendees, draft.category, &draft.hours_cause(), day).await;

        if let Some(error) = first_error {
            let failed = total - created.len();
            return Err(ScheduleError::Store(error.context(format!(
                "{} of {} rows for {:?} could not be stored",
                failed, total, draft.name
            ))));
        }
        awarded?;

        log::info!(
            "{} created {:?} on {} with {} row(s)",
            session.user,
            draft.name,
            day,
            created.len()
        );
        Ok(created)
    }

    /// Delete every row of a logical event and revoke its attendees' credits.
    ///
    /// Credits are revoked even if some rows fail to delete; the row failure
    /// is then reported.
    pub async fn delete_event(
        &self,
        session: &Session,
        event: &DisplayEvent,
    ) -> Result<usize, ScheduleError> {
        require_privileged(session, "delete")?;

        let outcome = join_all(event.row_ids.iter().map(|&id| self.events.delete(id))).await;
        let mut deleted = 0;
        let mut first_error = None;
        for result in outcome {
            match result {
                Ok(()) => deleted += 1,
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }

        let revoked = revoke_hours(
            self.ledger,
            &event.attendees,
            event.category,
            &event.hours_cause(),
            event.day,
        )
        .await;

        if let Some(error) = first_error {
            return Err(ScheduleError::Store(error.context(format!(
                "{} of {} rows for {:?} could not be deleted",
                event.row_ids.len() - deleted,
                event.row_ids.len(),
                event.name
            ))));
        }
        revoked?;

        log::info!(
            "{} deleted {:?} on {} ({} row(s))",
            session.user,
            event.name,
            event.day,
            deleted
        );
        Ok(deleted)
    }

    /// Replace a logical event: delete and revoke the old one, then create
    /// and award the new one. The draft is validated before anything is
    /// touched.
    pub async fn update_event(
        &self,
        session: &Session,
        existing: &DisplayEvent,
        draft: &EventDraft,
    ) -> Result<Vec<EventRow>, ScheduleError> {
        require_privileged(session, "edit")?;
        validated_day(draft)?;

        self.delete_event(session, existing).await?;
        self.create_event(session, draft).await
    }
}

fn require_privileged(session: &Session, action: &'static str) -> Result<(), ScheduleError> {
    if session.can_manage_events() {
        return Ok(());
    }

    log::warn!("{} ({}) tried to {} an event", session.user, session.role, action);
    Err(ScheduleError::Forbidden {
        user: session.user.clone(),
        role: session.role,
        action,
    })
}

fn validated_day(draft: &EventDraft) -> Result<NaiveDate, ScheduleError> {
    draft.validate().map_err(ScheduleError::InvalidEvent)?;
    parse_calendar_date(&draft.date)
        .ok_or_else(|| ScheduleError::InvalidEvent(format!("Event date {:?} did not parse", draft.date)))
}
