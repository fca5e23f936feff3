// Date utility functions
// Parsing of the loosely formatted date/time strings found in event rows

use chrono::{Datelike, Duration, NaiveDate};

/// Parse a stored date string into a calendar date.
///
/// Accepts ISO-8601 style values (`2024-03-05`, `2024-03-05T10:00:00Z`,
/// `2024-03-05 10:00:00`) and day-first values (`5/3/2024`, `5-3-2024`).
/// Any time-of-day or offset is discarded; the date is taken as written.
///
/// Returns `None` for empty or unparseable input.
///
/// # Examples
/// ```
/// use roster_calendar::utils::date::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
/// assert_eq!(parse_calendar_date("2024-03-05T10:00:00Z"), expected);
/// assert_eq!(parse_calendar_date("5/3/2024"), expected);
/// assert_eq!(parse_calendar_date("soon"), None);
/// ```
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(date) = parse_day_month_year(raw) {
        return Some(date);
    }

    let date_part = raw.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_day_month_year(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split(['/', '-']).collect();
    if parts.len() != 3 || parts[2].len() != 4 {
        return None;
    }

    let day = parse_digits(parts[0], 2)?;
    let month = parse_digits(parts[1], 2)?;
    let year = parse_digits(parts[2], 4)? as i32;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_digits(value: &str, max_len: usize) -> Option<u32> {
    if value.is_empty() || value.len() > max_len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Extract the wall-clock time of a value as minutes since midnight.
///
/// Takes the first `H:MM` / `HH:MM` in the text, so full timestamps
/// (`2024-03-05T09:30:00Z`, `2024-03-05 09:30`), bare times and ranges such
/// as `10:00 - 12:00` all resolve to their first clock time. `None` means
/// "no usable time" and sorts after every timed value.
pub fn minutes_since_midnight(raw: &str) -> Option<u32> {
    let bytes = raw.as_bytes();
    raw.match_indices(':').find_map(|(colon, _)| {
        let hour_start = bytes[..colon]
            .iter()
            .rposition(|b| !b.is_ascii_digit())
            .map_or(0, |index| index + 1);
        let hour = parse_digits(&raw[hour_start..colon], 2)?;
        let minute = parse_digits(raw.get(colon + 1..colon + 3)?, 2)?;

        (hour < 24 && minute < 60).then_some(hour * 60 + minute)
    })
}

/// Sort key for start times: untimed values order after all timed ones.
pub fn start_sort_key(raw: &str) -> u32 {
    minutes_since_midnight(raw).unwrap_or(u32::MAX)
}

/// Weekday of a date with Monday = 0 .. Sunday = 6.
pub fn monday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

/// True for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    monday_index(date) >= 5
}

/// Monday of the week containing `date`, `None` when that Monday falls
/// before `NaiveDate::MIN`.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(i64::from(monday_index(date))))
}

/// Number of days in the given month, `None` if the month is invalid.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Normalized `YYYY-M-D` form (no zero padding) used in grouping keys.
pub fn compact_date(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}
