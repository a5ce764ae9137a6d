//! Scenarios that go through a whole [`Planner`], with a mocked remote collection

use std::time::{Duration, Instant};

use chrono::NaiveDate;

use month_planner::config::NOTICE_DURATION;
use month_planner::error::PlannerError;
use month_planner::form::{NoticeLevel, MISSING_FIELDS_MESSAGE, SAVE_FAILED_MESSAGE};
use month_planner::mock_behaviour::MockBehaviour;
use month_planner::mock_remote::MockRemote;
use month_planner::storage::{FileStorage, MemoryStorage};
use month_planner::{Event, EventId, EventStore, Planner};

fn june_17() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 17).unwrap()
}

fn event(title: &str, date: &str) -> Event {
    Event::new(title, date.parse().unwrap())
}

/// A storage that already contains some local events
fn storage_with(events: Vec<Event>) -> MemoryStorage {
    let mut store = EventStore::new(MemoryStorage::new());
    store.replace_all(events).unwrap();
    store.storage().clone()
}


#[tokio::test]
async fn standup_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();

    let storage = storage_with(vec![event("Standup", "2024-06-03T09:00")]);
    let mut planner: Planner<_, MockRemote> = Planner::new(storage, None, june_17());
    planner.init().await.unwrap();

    let view = planner.render();
    assert_eq!(view.month_label, "June 2024");
    assert_eq!(view.grid.cells().iter().filter(|c| **c == month_planner::calendar::DayCell::Empty).count(), 6);
    match view.grid.day(3) {
        Some(month_planner::calendar::DayCell::Day{ day: 3, event_title: Some(title) }) => assert_eq!(title, "Standup"),
        other => panic!("Unexpected cell {:?}", other),
    }
    assert_eq!(view.schedule, vec!["Standup - Mon Jun 03 2024 at 09:00 AM".to_string()]);
}

#[tokio::test]
async fn init_prefers_remote_events() {
    let _ = env_logger::builder().is_test(true).try_init();

    let storage = storage_with(vec![event("Local only", "2024-06-10T10:00")]);
    let remote = MockRemote::with_events(vec![event("Standup", "2024-06-03T09:00"), event("Review", "2024-06-04T14:00")]);
    let mut planner = Planner::new(storage, Some(remote), june_17());
    planner.init().await.unwrap();

    assert_eq!(planner.store().len(), 2);
    assert_eq!(planner.store().events()[0].id(), Some(&EventId::Number(1)));
    // The pulled events have been persisted
    let reloaded = EventStore::from_storage(planner.store().storage().clone()).unwrap();
    assert_eq!(reloaded.events(), planner.store().events());
}

#[tokio::test]
async fn init_keeps_local_events_when_remote_fails_or_is_empty() {
    let _ = env_logger::builder().is_test(true).try_init();
    let local = vec![event("Local only", "2024-06-10T10:00")];

    let remote = MockRemote::with_events(vec![event("Standup", "2024-06-03T09:00")]);
    remote.set_behaviour(MockBehaviour::fail_now(1));
    let mut planner = Planner::new(storage_with(local.clone()), Some(remote), june_17());
    planner.init().await.unwrap();
    assert_eq!(planner.store().events(), &local[..]);

    let mut planner = Planner::new(storage_with(local.clone()), Some(MockRemote::new()), june_17());
    planner.init().await.unwrap();
    assert_eq!(planner.store().events(), &local[..]);
}

#[tokio::test]
async fn init_fails_on_corrupted_storage() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("events.json"), "[{\"title\": \"no date\"}]").unwrap();
    let mut planner = Planner::new(FileStorage::new(dir.path()), Some(MockRemote::new()), june_17());
    assert!(planner.init().await.is_err());
}

#[tokio::test]
async fn form_submissions() {
    let _ = env_logger::builder().is_test(true).try_init();

    let remote = MockRemote::new();
    let mut planner = Planner::new(MemoryStorage::new(), Some(remote.clone()), june_17());
    planner.init().await.unwrap();

    // Empty title
    planner.form_mut().fill("", "2024-06-03", "09:00");
    let submitted_at = Instant::now();
    assert!(matches!(planner.submit_form().await, Err(PlannerError::Form(_))));
    assert!(planner.store().is_empty());
    assert!(remote.events().is_empty());
    let notices = planner.notices_mut().visible(submitted_at);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].text(), MISSING_FIELDS_MESSAGE);
    assert!(planner.notices_mut().visible(submitted_at + NOTICE_DURATION + Duration::from_millis(100)).is_empty());

    // Valid event: the record returned by the remote is stored
    planner.form_mut().fill("Standup", "2024-06-03", "09:00");
    let saved = planner.submit_form().await.unwrap();
    assert_eq!(saved.id(), Some(&EventId::Number(1)));
    assert_eq!(planner.store().events(), &[saved.clone()][..]);
    assert_eq!(remote.events(), vec![saved]);
    let reloaded = EventStore::from_storage(planner.store().storage().clone()).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(planner.form().title.is_empty());

    // The remote refuses the event
    remote.set_behaviour(MockBehaviour::fail_now(1));
    planner.form_mut().fill("Review", "2024-06-04", "14:00");
    assert!(matches!(planner.submit_form().await, Err(PlannerError::Remote(_))));
    assert_eq!(planner.store().len(), 1);
    let notices = planner.notices_mut().visible(Instant::now());
    let last = notices.last().unwrap();
    assert_eq!(last.text(), SAVE_FAILED_MESSAGE);
    assert_eq!(last.level(), NoticeLevel::Error);
    // Inputs are kept so that the user can try again
    assert_eq!(planner.form().title, "Review");
}

#[tokio::test]
async fn update_and_delete() {
    let _ = env_logger::builder().is_test(true).try_init();

    let remote = MockRemote::with_events(vec![event("Standup", "2024-06-03T09:00"), event("Review", "2024-06-04T14:00")]);
    let mut planner = Planner::new(MemoryStorage::new(), Some(remote.clone()), june_17());
    planner.init().await.unwrap();

    let moved = event("Standup", "2024-06-05T09:30");
    let updated = planner.update_event(&EventId::Number(1), moved).await.unwrap();
    assert_eq!(updated.id(), Some(&EventId::Number(1)));
    assert_eq!(planner.store().events()[0], updated);
    assert!(planner.render().grid.day(5).unwrap().has_event());
    assert!(planner.render().grid.day(3).unwrap().has_event() == false);

    // Unknown on the remote: nothing changes locally
    let before = planner.store().events().to_vec();
    assert!(planner.update_event(&EventId::Number(42), event("Ghost", "2024-06-06T09:00")).await.is_err());
    assert!(planner.delete_event(&EventId::Number(42)).await.is_err());
    assert_eq!(planner.store().events(), &before[..]);

    // Failing deletion
    remote.set_behaviour(MockBehaviour::fail_now(1));
    assert!(planner.delete_event(&EventId::Number(2)).await.is_err());
    assert_eq!(planner.store().len(), 2);

    planner.delete_event(&EventId::Number(2)).await.unwrap();
    assert_eq!(planner.store().len(), 1);
    assert_eq!(remote.events().len(), 1);
    assert_eq!(planner.render().schedule, vec!["Standup - Wed Jun 05 2024 at 09:30 AM".to_string()]);
}

#[tokio::test]
async fn same_day_events_and_navigation() {
    let _ = env_logger::builder().is_test(true).try_init();

    let storage = storage_with(vec![
        event("First", "2024-06-03T11:00"),
        event("Second", "2024-06-03T08:00"),
        event("July", "2024-07-01T08:00"),
    ]);
    let mut planner: Planner<_, MockRemote> = Planner::new(storage, None, june_17());
    planner.init().await.unwrap();

    let grid = planner.render().grid;
    assert_eq!(grid.day(3), Some(&month_planner::calendar::DayCell::Day{ day: 3, event_title: Some("First".to_string()) }));

    assert!(planner.change_month(1));
    let view = planner.render();
    assert_eq!(view.month_label, "July 2024");
    // July 1st, 2024 is a Monday
    assert_eq!(view.grid.cells()[0], month_planner::calendar::DayCell::Empty);
    assert!(view.grid.day(1).unwrap().has_event());
    assert_eq!(view.schedule.len(), 3);

    assert!(planner.change_month(-2));
    assert_eq!(planner.render().month_label, "May 2024");
}
