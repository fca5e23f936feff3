// Event module
// Stored event rows (one per attendee) and the grouped display projection

mod group_key;

pub use group_key::group_key;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::category::EventCategory;
use crate::utils::date::parse_calendar_date;

/// One stored row: a single attendee's place at an event.
///
/// Date and time fields keep the raw text the store holds; they are parsed
/// when rows are grouped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: Option<i64>,
    pub date: String,
    pub name: String,
    pub category: EventCategory,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub certification: Option<String>,
    pub promotion: Option<String>,
    pub menu: Option<String>,
    pub venue: Option<String>,
    pub attendee_user: Option<String>,
    pub notes: Option<String>,
}

impl EventRow {
    /// Create a row with the required fields; everything else unset.
    ///
    /// # Examples
    /// ```
    /// use roster_calendar::models::category::EventCategory;
    /// use roster_calendar::models::event::EventRow;
    ///
    /// let row = EventRow::new("2024-05-01", "Taller de pan", EventCategory::Taller)
    ///     .with_start_time("10:00")
    ///     .with_attendee("alice");
    /// assert_eq!(row.attendee_user.as_deref(), Some("alice"));
    /// ```
    pub fn new(date: impl Into<String>, name: impl Into<String>, category: EventCategory) -> Self {
        Self {
            id: None,
            date: date.into(),
            name: name.into(),
            category,
            start_time: None,
            end_time: None,
            certification: None,
            promotion: None,
            menu: None,
            venue: None,
            attendee_user: None,
            notes: None,
        }
    }

    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn with_certification(mut self, certification: impl Into<String>) -> Self {
        self.certification = Some(certification.into());
        self
    }

    pub fn with_promotion(mut self, promotion: impl Into<String>) -> Self {
        self.promotion = Some(promotion.into());
        self
    }

    pub fn with_menu(mut self, menu: impl Into<String>) -> Self {
        self.menu = Some(menu.into());
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_attendee(mut self, user: impl Into<String>) -> Self {
        self.attendee_user = Some(user.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Calendar date of the row, `None` when the stored date is unparseable.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }

    /// Grouping key identifying the logical event this row belongs to.
    pub fn group_key(&self) -> String {
        group_key(self)
    }
}

/// Grouped, read-only projection of one logical event on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEvent {
    pub group_key: String,
    pub day: NaiveDate,
    pub date: String,
    pub name: String,
    pub category: EventCategory,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub certification: Option<String>,
    pub promotion: Option<String>,
    pub menu: Option<String>,
    pub venue: Option<String>,
    pub notes: Option<String>,
    /// Number of rows collapsed into this event.
    pub attendee_count: usize,
    /// Distinct attendees in first-seen order.
    pub attendees: Vec<String>,
    /// Store ids of the collapsed rows.
    pub row_ids: Vec<i64>,
}

impl DisplayEvent {
    /// Seed a display event from the first row seen for a group.
    /// The name is stored trimmed, the form the group key compares.
    pub(crate) fn seed(row: &EventRow, day: NaiveDate, group_key: String) -> Self {
        let mut event = Self {
            group_key,
            day,
            date: row.date.clone(),
            name: row.name.trim().to_string(),
            category: row.category,
            start_time: row.start_time.clone(),
            end_time: row.end_time.clone(),
            certification: row.certification.clone(),
            promotion: row.promotion.clone(),
            menu: row.menu.clone(),
            venue: row.venue.clone(),
            notes: row.notes.clone(),
            attendee_count: 0,
            attendees: Vec::new(),
            row_ids: Vec::new(),
        };
        event.absorb(row);
        event
    }

    /// Fold another row of the same logical event into this one.
    pub(crate) fn absorb(&mut self, row: &EventRow) {
        self.attendee_count += 1;
        if let Some(user) = row.attendee_user.as_deref() {
            if !self.attendees.iter().any(|existing| existing == user) {
                self.attendees.push(user.to_string());
            }
        }
        if let Some(id) = row.id {
            self.row_ids.push(id);
        }
    }

    /// Reason recorded on hour credits for this event.
    pub fn hours_cause(&self) -> String {
        hours_cause(&self.name, self.category)
    }
}

/// Ledger cause for an event: its trimmed name, or the category label when
/// the name is blank.
pub fn hours_cause(name: &str, category: EventCategory) -> String {
    let name = name.trim();
    if name.is_empty() {
        category.label().to_string()
    } else {
        name.to_string()
    }
}

/// Input for scheduling a new logical event with its attendee list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub date: String,
    pub name: String,
    pub category: EventCategory,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub certification: Option<String>,
    pub promotion: Option<String>,
    pub menu: Option<String>,
    pub venue: Option<String>,
    pub notes: Option<String>,
    pub attendees: Vec<String>,
}

impl EventDraft {
    pub fn new(date: impl Into<String>, name: impl Into<String>, category: EventCategory) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
            category,
            start_time: None,
            end_time: None,
            certification: None,
            promotion: None,
            menu: None,
            venue: None,
            notes: None,
            attendees: Vec::new(),
        }
    }

    /// Validate the draft before anything is written.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Event name cannot be empty".to_string());
        }

        if parse_calendar_date(&self.date).is_none() {
            return Err(format!("Event date {:?} is not a valid date", self.date));
        }

        if self.attendees.iter().any(|user| user.trim().is_empty()) {
            return Err("Attendee identifiers cannot be empty".to_string());
        }

        Ok(())
    }

    /// Distinct attendees, trimmed, in the order given.
    pub fn distinct_attendees(&self) -> Vec<String> {
        let mut distinct: Vec<String> = Vec::with_capacity(self.attendees.len());
        for user in &self.attendees {
            let user = user.trim();
            if !distinct.iter().any(|existing| existing == user) {
                distinct.push(user.to_string());
            }
        }
        distinct
    }

    /// Expand into store rows: one per distinct attendee, or a single
    /// attendee-less row when nobody is attending yet.
    pub fn to_rows(&self) -> Vec<EventRow> {
        let template = EventRow {
            id: None,
            date: self.date.clone(),
            name: self.name.trim().to_string(),
            category: self.category,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            certification: self.certification.clone(),
            promotion: self.promotion.clone(),
            menu: self.menu.clone(),
            venue: self.venue.clone(),
            attendee_user: None,
            notes: self.notes.clone(),
        };

        let attendees = self.distinct_attendees();
        if attendees.is_empty() {
            return vec![template];
        }

        attendees
            .into_iter()
            .map(|user| EventRow {
                attendee_user: Some(user),
                ..template.clone()
            })
            .collect()
    }

    /// Reason recorded on hour credits for this draft.
    pub fn hours_cause(&self) -> String {
        hours_cause(&self.name, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> EventDraft {
        let mut draft = EventDraft::new("2024-05-01", "Taller de pan", EventCategory::Taller);
        draft.start_time = Some("10:00".to_string());
        draft.attendees = vec!["alice".to_string(), "bob".to_string()];
        draft
    }

    #[test]
    fn test_draft_validate_success() {
        assert!(sample_draft().validate().is_ok());
    }

    #[test]
    fn test_draft_empty_name() {
        let mut draft = sample_draft();
        draft.name = "   ".to_string();
        assert_eq!(draft.validate().unwrap_err(), "Event name cannot be empty");
    }

    #[test]
    fn test_draft_bad_date() {
        let mut draft = sample_draft();
        draft.date = "someday".to_string();
        assert!(draft.validate().unwrap_err().contains("not a valid date"));
    }

    #[test]
    fn test_draft_blank_attendee() {
        let mut draft = sample_draft();
        draft.attendees.push(" ".to_string());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_to_rows_one_per_distinct_attendee() {
        let mut draft = sample_draft();
        draft.attendees.push("alice".to_string());

        let rows = draft.to_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].attendee_user.as_deref(), Some("alice"));
        assert_eq!(rows[1].attendee_user.as_deref(), Some("bob"));
        assert_eq!(rows[0].group_key(), rows[1].group_key());
    }

    #[test]
    fn test_to_rows_without_attendees() {
        let mut draft = sample_draft();
        draft.attendees.clear();

        let rows = draft.to_rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].attendee_user.is_none());
    }

    #[test]
    fn test_hours_cause_falls_back_to_category() {
        assert_eq!(hours_cause("  Pan ", EventCategory::Taller), "Pan");
        assert_eq!(hours_cause("  ", EventCategory::Charla), "Charla");
    }

    #[test]
    fn test_display_event_dedupes_attendees() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let first = EventRow::new("2024-05-01", "Cena", EventCategory::Comida).with_attendee("alice");
        let mut event = DisplayEvent::seed(&first, day, first.group_key());
        event.absorb(&first);
        event.absorb(&first.clone().with_attendee("bob"));

        assert_eq!(event.attendee_count, 3);
        assert_eq!(event.attendees, vec!["alice", "bob"]);
    }
}
