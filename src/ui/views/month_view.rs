use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::{day_heading, event_line, WEEKDAY_NAMES};
use crate::models::event::DisplayEvent;
use crate::services::calendar_grid::MonthGrid;

const CELL_WIDTH: usize = 8;

/// Render a month grid followed by an agenda of the days that have events.
///
/// Each cell shows the day number and, when the day has events, their count
/// in parentheses. Padding cells are blank.
pub fn render_month(grid: &MonthGrid, days: &BTreeMap<NaiveDate, Vec<DisplayEvent>>) -> String {
    let mut out = String::new();

    let title = NaiveDate::from_ymd_opt(grid.year, grid.month, 1)
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{}", grid.year, grid.month));
    out.push_str(&title);
    out.push('\n');

    let header: Vec<String> = WEEKDAY_NAMES[..grid.columns]
        .iter()
        .map(|name| format!("{:<width$}", name, width = CELL_WIDTH))
        .collect();
    out.push_str(header.concat().trim_end());
    out.push('\n');

    for week in grid.weeks() {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| format!("{:<width$}", cell_label(*cell, days), width = CELL_WIDTH))
            .collect();
        out.push_str(cells.concat().trim_end());
        out.push('\n');
    }

    for day in grid.dates() {
        let Some(events) = days.get(&day).filter(|events| !events.is_empty()) else {
            continue;
        };
        out.push('\n');
        out.push_str(&day_heading(day));
        out.push('\n');
        for event in events {
            out.push_str("  ");
            out.push_str(&event_line(event));
            out.push('\n');
        }
    }

    out
}

fn cell_label(cell: Option<NaiveDate>, days: &BTreeMap<NaiveDate, Vec<DisplayEvent>>) -> String {
    match cell {
        None => String::new(),
        Some(day) => match days.get(&day).map(Vec::len).unwrap_or(0) {
            0 => day.day().to_string(),
            count => format!("{}({})", day.day(), count),
        },
    }
}
