// Test fixtures - reusable test data
// Provides consistent rows, drafts and sessions across the test files

#![allow(dead_code)]

use chrono::NaiveDate;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, May 1 2024
    pub fn may_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample sessions for testing
pub mod sessions {
    use roster_calendar::models::session::{Role, Session};

    pub fn admin() -> Session {
        Session::new("admin", Role::Admin)
    }

    pub fn coordinator() -> Session {
        Session::new("coord", Role::Coordinator)
    }

    pub fn participant(user: &str) -> Session {
        Session::new(user, Role::Participant)
    }
}

/// Sample events for testing
pub mod events {
    use roster_calendar::models::category::EventCategory;
    use roster_calendar::models::event::EventDraft;

    /// Bread workshop on May 1 2024 with three attendees
    pub fn bread_workshop() -> EventDraft {
        EventDraft {
            start_time: Some("10:00".to_string()),
            end_time: Some("12:00".to_string()),
            certification: Some("B1".to_string()),
            venue: Some("Aula 1".to_string()),
            attendees: vec!["alice".to_string(), "bob".to_string(), "carla".to_string()],
            ..EventDraft::new("2024-05-01", "Taller de pan", EventCategory::Taller)
        }
    }

    /// Lunch on the same day; earns no hours
    pub fn lunch() -> EventDraft {
        EventDraft {
            start_time: Some("14:00".to_string()),
            menu: Some("vegetariano".to_string()),
            attendees: vec!["alice".to_string(), "bob".to_string()],
            ..EventDraft::new("1/5/2024", "Almuerzo", EventCategory::Comida)
        }
    }
}
