// Property-based tests for event grouping and grid layout
// Random rosters and months must keep the invariants the views rely on

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use roster_calendar::models::category::EventCategory;
use roster_calendar::models::event::EventRow;
use roster_calendar::services::calendar_grid::build_month_grid;
use roster_calendar::services::event::{events_by_day, events_for_day};
use roster_calendar::utils::date::{days_in_month, is_weekend, parse_calendar_date, start_sort_key};

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

prop_compose! {
    fn arb_row()(
        offset in 0..3i64,
        iso in any::<bool>(),
        name in prop::sample::select(vec!["Taller de pan", "Charla", " Charla", "Charla ", "Pan|Queso", "Visita"]),
        category in prop::sample::select(EventCategory::ALL.to_vec()),
        start in prop::sample::select(vec![None, Some("09:00"), Some("9:30"), Some("14:00"), Some("tbd")]),
        attendee in prop::option::of(prop::sample::select(vec!["alice", "bob", "carla"])),
    ) -> EventRow {
        let day = base_day() + Duration::days(offset);
        let date = if iso {
            day.format("%Y-%m-%d").to_string()
        } else {
            format!("{}/{}/{}", day.day(), day.month(), day.year())
        };

        let mut row = EventRow::new(date, name, category);
        row.start_time = start.map(str::to_string);
        row.attendee_user = attendee.map(str::to_string);
        row
    }
}

proptest! {
    /// Property: every row dated on the day lands in exactly one display event
    #[test]
    fn prop_grouping_accounts_for_every_row(rows in prop::collection::vec(arb_row(), 0..40)) {
        let day = base_day();
        let events = events_for_day(&rows, day);

        let on_day = rows.iter().filter(|row| row.calendar_date() == Some(day)).count();
        let counted: usize = events.iter().map(|event| event.attendee_count).sum();
        prop_assert_eq!(counted, on_day);

        let keys: HashSet<&str> = events.iter().map(|event| event.group_key.as_str()).collect();
        prop_assert_eq!(keys.len(), events.len());
    }

    /// Property: display events are ordered by start time, then name
    #[test]
    fn prop_grouping_is_sorted(rows in prop::collection::vec(arb_row(), 0..40)) {
        let events = events_for_day(&rows, base_day());
        for pair in events.windows(2) {
            let a = (start_sort_key(pair[0].start_time.as_deref().unwrap_or("")), &pair[0].name);
            let b = (start_sort_key(pair[1].start_time.as_deref().unwrap_or("")), &pair[1].name);
            prop_assert!(a <= b);
        }
    }

    /// Property: input order only changes the order of attendee lists,
    /// even when rows of one event differ in name padding
    #[test]
    fn prop_grouping_ignores_input_order(rows in prop::collection::vec(arb_row(), 0..40)) {
        let forward = events_for_day(&rows, base_day());
        let reversed: Vec<EventRow> = rows.iter().rev().cloned().collect();
        let backward = events_for_day(&reversed, base_day());

        let summary = |events: &[roster_calendar::models::event::DisplayEvent]| {
            events
                .iter()
                .map(|event| {
                    let mut attendees = event.attendees.clone();
                    attendees.sort();
                    (event.group_key.clone(), event.name.clone(), event.attendee_count, attendees)
                })
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(summary(&forward), summary(&backward));
    }

    /// Property: bucketing a range matches resolving each day on its own
    #[test]
    fn prop_events_by_day_matches_per_day(rows in prop::collection::vec(arb_row(), 0..40)) {
        let start = base_day();
        let end = start + Duration::days(1);
        let days = events_by_day(&rows, start, end);

        for day in [start, end] {
            let expected = events_for_day(&rows, day);
            match days.get(&day) {
                Some(events) => prop_assert_eq!(events, &expected),
                None => prop_assert!(expected.is_empty()),
            }
        }
        prop_assert!(days.keys().all(|day| *day >= start && *day <= end));
    }

    /// Property: month grids are whole weeks listing every shown day once, in order
    #[test]
    fn prop_month_grid_shape(
        year in 1990..2100i32,
        month in 1..=12u32,
        include_weekends in any::<bool>(),
    ) {
        let grid = build_month_grid(year, month, include_weekends).unwrap();
        let columns = if include_weekends { 7 } else { 5 };
        prop_assert_eq!(grid.columns, columns);
        prop_assert_eq!(grid.cells.len() % columns, 0);

        let dates: Vec<NaiveDate> = grid.dates().collect();
        let day_count = days_in_month(year, month).unwrap() as usize;
        let expected = if include_weekends {
            day_count
        } else {
            (1..=day_count as u32)
                .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
                .filter(|date| !is_weekend(*date))
                .count()
        };
        prop_assert_eq!(dates.len(), expected);
        prop_assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(dates.iter().all(|date| date.month() == month && date.year() == year));
        if !include_weekends {
            prop_assert!(dates.iter().all(|date| !is_weekend(*date)));
        }
    }

    /// Property: both accepted date spellings resolve to the same day
    #[test]
    fn prop_date_spellings_agree(offset in 0..20_000i64) {
        let date = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap() + Duration::days(offset);
        let iso = date.format("%Y-%m-%d").to_string();
        let dmy = format!("{}/{}/{}", date.day(), date.month(), date.year());

        prop_assert_eq!(parse_calendar_date(&iso), Some(date));
        prop_assert_eq!(parse_calendar_date(&dmy), Some(date));
        prop_assert_eq!(parse_calendar_date(&format!("{}T08:00:00Z", iso)), Some(date));
    }
}
