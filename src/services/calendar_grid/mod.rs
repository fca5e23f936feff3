//! Month and week layouts for the calendar views.
//!
//! A month grid is a flat list of cells, `None` marking padding, read in
//! rows of 7 columns (full week) or 5 columns (workweek only).

use chrono::{Duration, NaiveDate};

use crate::utils::date::{days_in_month, is_weekend, monday_index, week_start};

const FULL_WEEK: usize = 7;
const WORK_WEEK: usize = 5;

/// Cells of one month laid out for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub columns: usize,
    pub cells: Vec<Option<NaiveDate>>,
}

impl MonthGrid {
    /// Rows of `columns` cells each.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<NaiveDate>]> {
        self.cells.chunks(self.columns)
    }

    /// Dates shown in the grid, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// First and last date shown, `None` for an empty grid.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.dates().next()?, self.dates().last()?))
    }
}

/// Lay out a month (1-based) under the given weekend policy.
///
/// With weekends the grid is Monday-first, padded on both sides to whole
/// weeks. Without weekends only Monday to Friday are kept; the leading pad
/// equals the weekday of the 1st when that is a workday and is omitted when
/// the month starts on a weekend, and the tail is padded to a multiple of 5.
///
/// Returns `None` when `month` is not a valid month.
///
/// # Examples
/// ```
/// use roster_calendar::services::calendar_grid::build_month_grid;
///
/// let grid = build_month_grid(2024, 2, true).unwrap();
/// assert_eq!(grid.cells.len() % 7, 0);
/// assert_eq!(grid.dates().count(), 29);
/// ```
pub fn build_month_grid(year: i32, month: u32, include_weekends: bool) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let day_count = days_in_month(year, month)? as usize;
    let start_weekday = monday_index(first) as usize;

    let (columns, cells) = if include_weekends {
        (FULL_WEEK, full_week_cells(first, start_weekday, day_count))
    } else {
        (WORK_WEEK, work_week_cells(first, start_weekday, day_count))
    };

    Some(MonthGrid {
        year,
        month,
        columns,
        cells,
    })
}

fn full_week_cells(first: NaiveDate, start_weekday: usize, day_count: usize) -> Vec<Option<NaiveDate>> {
    let total = (start_weekday + day_count).div_ceil(FULL_WEEK) * FULL_WEEK;
    (0..total)
        .map(|index| {
            let day_offset = index as i64 - start_weekday as i64;
            if day_offset < 0 || day_offset >= day_count as i64 {
                None
            } else {
                Some(first + Duration::days(day_offset))
            }
        })
        .collect()
}

fn work_week_cells(first: NaiveDate, start_weekday: usize, day_count: usize) -> Vec<Option<NaiveDate>> {
    let lead = if start_weekday < WORK_WEEK { start_weekday } else { 0 };

    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(
        (0..day_count as i64)
            .map(|offset| first + Duration::days(offset))
            .filter(|date| !is_weekend(*date))
            .map(Some),
    );

    let remainder = cells.len() % WORK_WEEK;
    if remainder != 0 {
        cells.resize(cells.len() + WORK_WEEK - remainder, None);
    }
    cells
}

/// The 5 or 7 consecutive dates of the week containing `anchor`, from Monday.
///
/// At the ends of the representable calendar the week is cut short: days
/// past `NaiveDate::MAX` are omitted, and a week whose Monday precedes
/// `NaiveDate::MIN` starts at the anchor.
pub fn build_week_dates(anchor: NaiveDate, include_weekends: bool) -> Vec<NaiveDate> {
    let length = if include_weekends { FULL_WEEK } else { WORK_WEEK };
    let monday = week_start(anchor);
    let first = monday.unwrap_or(anchor);
    let skipped = if monday.is_some() { 0 } else { monday_index(anchor) as usize };

    first
        .iter_days()
        .take(length.saturating_sub(skipped))
        .collect()
}
