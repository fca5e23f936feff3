use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{day_heading, event_line};
use crate::models::event::DisplayEvent;

/// Render one section per date, listing its events or "(no events)".
pub fn render_week(dates: &[NaiveDate], days: &BTreeMap<NaiveDate, Vec<DisplayEvent>>) -> String {
    let mut out = String::new();

    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        out.push_str(&format!("Week of {} to {}\n", first, last));
    }

    for day in dates {
        out.push('\n');
        out.push_str(&day_heading(*day));
        out.push('\n');

        match days.get(day) {
            Some(events) if !events.is_empty() => {
                for event in events {
                    out.push_str("  ");
                    out.push_str(&event_line(event));
                    out.push('\n');
                }
            }
            _ => out.push_str("  (no events)\n"),
        }
    }

    out
}
