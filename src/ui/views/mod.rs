// Calendar views
// Month and week layouts rendered as plain text

pub mod month_view;
pub mod week_view;

pub use month_view::render_month;
pub use week_view::render_week;

use chrono::NaiveDate;

use crate::models::event::DisplayEvent;

pub(crate) const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One line per display event: time span, name, category, attendee count
/// and venue when known.
pub(crate) fn event_line(event: &DisplayEvent) -> String {
    let start = event.start_time.as_deref().unwrap_or("--:--");
    let mut line = match event.end_time.as_deref() {
        Some(end) => format!("{}-{} {}", start, end, event.name),
        None => format!("{} {}", start, event.name),
    };

    line.push_str(&format!(" [{}]", event.category));
    if event.attendee_count > 1 {
        line.push_str(&format!(" x{}", event.attendee_count));
    }
    if let Some(venue) = event.venue.as_deref().filter(|v| !v.trim().is_empty()) {
        line.push_str(&format!(" @ {}", venue));
    }
    line
}

pub(crate) fn day_heading(day: NaiveDate) -> String {
    day.format("%a %-d %b %Y").to_string()
}
