use super::EventRow;
use crate::models::category::Certification;
use crate::utils::date::compact_date;

const DELIMITER: char = '|';
const ESCAPE: char = '\\';

/// Composite key identifying the logical event a row belongs to.
///
/// Two rows are the same logical event exactly when they agree on date,
/// name, category, start time, certification, promotion and menu. Field
/// text is escaped so the delimiter inside a field cannot shift the split.
pub fn group_key(row: &EventRow) -> String {
    let date = row.calendar_date().map(compact_date).unwrap_or_default();
    let fields = [
        date.as_str(),
        row.name.trim(),
        row.category.label(),
        row.start_time.as_deref().unwrap_or(""),
        Certification::normalize(row.certification.as_deref().unwrap_or("")),
        row.promotion.as_deref().unwrap_or("").trim(),
        row.menu.as_deref().unwrap_or("").trim(),
    ];

    let mut key = String::with_capacity(fields.iter().map(|f| f.len() + 1).sum());
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            key.push(DELIMITER);
        }
        push_escaped(&mut key, field);
    }
    key
}

fn push_escaped(key: &mut String, field: &str) {
    for ch in field.chars() {
        if ch == DELIMITER || ch == ESCAPE {
            key.push(ESCAPE);
        }
        key.push(ch);
    }
}
