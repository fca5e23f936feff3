//! Collapses per-attendee rows into one display event per logical event and
//! day, ordered for rendering.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::event::{DisplayEvent, EventRow};
use crate::utils::date::start_sort_key;

/// Display events for one calendar day.
///
/// Rows dated on other days, or with unparseable dates, are skipped. Rows
/// sharing a group key are folded together: the first row seeds the event,
/// later rows add to the count and contribute their attendee if unseen.
/// Attendee order follows input order; everything else is independent of it.
pub fn events_for_day(rows: &[EventRow], day: NaiveDate) -> Vec<DisplayEvent> {
    let mut grouped = Grouped::default();
    for row in rows {
        if row.calendar_date() == Some(day) {
            grouped.add(row, day);
        }
    }
    grouped.into_sorted()
}

/// Bucket rows by day in a single pass, keeping only days in `start..=end`.
/// Days without events are absent from the map.
pub fn events_by_day(
    rows: &[EventRow],
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeMap<NaiveDate, Vec<DisplayEvent>> {
    let mut per_day: BTreeMap<NaiveDate, Grouped> = BTreeMap::new();
    for row in rows {
        let Some(day) = row.calendar_date() else {
            continue;
        };
        if day < start || day > end {
            continue;
        }
        per_day.entry(day).or_default().add(row, day);
    }

    per_day
        .into_iter()
        .map(|(day, grouped)| (day, grouped.into_sorted()))
        .collect()
}

#[derive(Default)]
struct Grouped {
    index: HashMap<String, usize>,
    events: Vec<DisplayEvent>,
}

impl Grouped {
    fn add(&mut self, row: &EventRow, day: NaiveDate) {
        let key = row.group_key();
        match self.index.get(&key) {
            Some(&position) => self.events[position].absorb(row),
            None => {
                self.index.insert(key.clone(), self.events.len());
                self.events.push(DisplayEvent::seed(row, day, key));
            }
        }
    }

    fn into_sorted(self) -> Vec<DisplayEvent> {
        let mut events = self.events;
        events.sort_by(|a, b| {
            let a_start = start_sort_key(a.start_time.as_deref().unwrap_or(""));
            let b_start = start_sort_key(b.start_time.as_deref().unwrap_or(""));
            a_start
                .cmp(&b_start)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.group_key.cmp(&b.group_key))
        });
        events
    }
}
