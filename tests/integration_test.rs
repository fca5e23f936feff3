// Integration tests for scheduling against SQLite and settings persistence

mod fixtures;

use fixtures::{dates, events, sessions};
use pretty_assertions::assert_eq;
use roster_calendar::models::event::EventDraft;
use roster_calendar::models::settings::{AppConfig, Settings};
use roster_calendar::models::ui::ViewType;
use roster_calendar::services::database::Database;
use roster_calendar::services::hours::HoursService;
use roster_calendar::services::schedule::{ScheduleError, ScheduleService};
use roster_calendar::services::settings::SettingsService;
use roster_calendar::services::store::SqliteStore;

fn hours_total(store: &SqliteStore, user: &str) -> u32 {
    store
        .with_db(|db| HoursService::new(db.connection()).total_for_user(user))
        .unwrap()
}

#[tokio::test]
async fn test_schedule_groups_and_credits() {
    let store = SqliteStore::in_memory().unwrap();
    let schedule = ScheduleService::new(&store, &store);
    let admin = sessions::admin();

    let rows = schedule.create_event(&admin, &events::bread_workshop()).await.unwrap();
    assert_eq!(rows.len(), 3);
    schedule.create_event(&admin, &events::lunch()).await.unwrap();

    let day = dates::may_day_2024();
    let days = schedule.load_days(&admin, day, day).await.unwrap();
    let listed = &days[&day];

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Taller de pan");
    assert_eq!(listed[0].attendee_count, 3);
    assert_eq!(listed[0].attendees, vec!["alice", "bob", "carla"]);
    assert_eq!(listed[1].name, "Almuerzo");
    assert_eq!(listed[1].attendee_count, 2);

    // Only the workshop earns hours.
    assert_eq!(hours_total(&store, "alice"), 3);
    assert_eq!(hours_total(&store, "carla"), 3);
}

#[tokio::test]
async fn test_delete_removes_rows_and_hours() {
    let store = SqliteStore::in_memory().unwrap();
    let schedule = ScheduleService::new(&store, &store);
    let admin = sessions::admin();
    let day = dates::may_day_2024();

    schedule.create_event(&admin, &events::bread_workshop()).await.unwrap();
    let days = schedule.load_days(&admin, day, day).await.unwrap();
    let workshop = days[&day][0].clone();

    let deleted = schedule.delete_event(&admin, &workshop).await.unwrap();
    assert_eq!(deleted, 3);

    let days = schedule.load_days(&admin, day, day).await.unwrap();
    assert!(days.is_empty());
    for user in ["alice", "bob", "carla"] {
        assert_eq!(hours_total(&store, user), 0);
    }
}

#[tokio::test]
async fn test_update_moves_credits_to_new_attendees() {
    let store = SqliteStore::in_memory().unwrap();
    let schedule = ScheduleService::new(&store, &store);
    let coordinator = sessions::coordinator();
    let day = dates::may_day_2024();

    schedule.create_event(&coordinator, &events::bread_workshop()).await.unwrap();
    let existing = schedule.load_days(&coordinator, day, day).await.unwrap()[&day][0].clone();

    let replacement = EventDraft {
        attendees: vec!["dario".to_string()],
        ..events::bread_workshop()
    };
    schedule.update_event(&coordinator, &existing, &replacement).await.unwrap();

    assert_eq!(hours_total(&store, "alice"), 0);
    assert_eq!(hours_total(&store, "dario"), 3);
    let listed = schedule.load_days(&coordinator, day, day).await.unwrap();
    assert_eq!(listed[&day][0].attendees, vec!["dario"]);
}

#[tokio::test]
async fn test_participant_sees_only_own_rows_and_cannot_edit() {
    let store = SqliteStore::in_memory().unwrap();
    let schedule = ScheduleService::new(&store, &store);
    let day = dates::may_day_2024();

    schedule.create_event(&sessions::admin(), &events::bread_workshop()).await.unwrap();

    let bob = sessions::participant("bob");
    let days = schedule.load_days(&bob, day, day).await.unwrap();
    assert_eq!(days[&day].len(), 1);
    assert_eq!(days[&day][0].attendee_count, 1);
    assert_eq!(days[&day][0].attendees, vec!["bob"]);

    let result = schedule.create_event(&bob, &events::lunch()).await;
    assert!(matches!(result, Err(ScheduleError::Forbidden { .. })));

    let result = schedule.delete_event(&bob, &days[&day][0]).await;
    assert!(matches!(result, Err(ScheduleError::Forbidden { .. })));
    assert_eq!(hours_total(&store, "bob"), 3);
}

#[tokio::test]
async fn test_invalid_draft_writes_nothing() {
    let store = SqliteStore::in_memory().unwrap();
    let schedule = ScheduleService::new(&store, &store);
    let day = dates::may_day_2024();

    let draft = EventDraft {
        name: "   ".to_string(),
        ..events::bread_workshop()
    };
    let result = schedule.create_event(&sessions::admin(), &draft).await;

    assert!(matches!(result, Err(ScheduleError::InvalidEvent(_))));
    assert!(schedule.load_days(&sessions::admin(), day, day).await.unwrap().is_empty());
    assert_eq!(hours_total(&store, "alice"), 0);
}

#[test]
fn test_settings_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.db");

    {
        let db = Database::new(path.to_str().unwrap()).expect("Failed to create database");
        db.initialize_schema().expect("Failed to initialize schema");
        let service = SettingsService::new(&db);

        let settings = service.get().expect("Failed to get settings");
        assert_eq!(settings, Settings::default());

        service
            .update(&Settings {
                include_weekends: true,
                current_view: ViewType::Week,
                ..settings
            })
            .expect("Failed to update settings");
    }

    // Reopen to verify the values were written to disk
    let db = Database::new(path.to_str().unwrap()).unwrap();
    db.initialize_schema().unwrap();
    let loaded = SettingsService::new(&db).get().unwrap();
    assert!(loaded.include_weekends);
    assert_eq!(loaded.current_view, ViewType::Week);
}

#[test]
fn test_config_points_store_at_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let db_path = dir.path().join("roster.db");
    std::fs::write(
        &config_path,
        format!("database_path = {:?}\ninclude_weekends = true\n", db_path.to_str().unwrap()),
    )
    .unwrap();

    let config = AppConfig::load_from(&config_path).unwrap();
    let resolved = config.resolve_database_path().unwrap();
    assert_eq!(resolved, db_path);
    assert!(config.weekend_policy(None, &Settings::default()));

    SqliteStore::open(resolved.to_str().unwrap()).unwrap();
    assert!(db_path.exists());
}
