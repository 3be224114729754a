use chrono::{NaiveDate, NaiveDateTime};
use ticklist_core::time::rules::{
    end_of_day, is_due_today, is_overdue, is_past_date, is_reminder_active,
    reminder_precedes_due_date, today,
};
use ticklist_core::Todo;

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn instant(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn todo(due_date: Option<&str>, reminder: Option<&str>, completed: bool) -> Todo {
    Todo {
        id: 1,
        text: "task".to_string(),
        completed,
        due_date: due_date.map(date),
        reminder: reminder.map(instant),
        photo: None,
        created_at: instant("2025-08-01T00:00:00"),
    }
}

#[test]
fn today_is_the_calendar_day_of_now() {
    assert_eq!(today(instant("2025-08-01T23:59:59")), date("2025-08-01"));
    assert_eq!(today(instant("2025-08-02T00:00:00")), date("2025-08-02"));
}

#[test]
fn past_date_is_strictly_before_today() {
    let now = instant("2025-08-05T10:00:00");
    assert!(is_past_date(date("2025-08-04"), now));
    assert!(!is_past_date(date("2025-08-05"), now));
    assert!(!is_past_date(date("2025-08-06"), now));
}

#[test]
fn overdue_needs_past_due_date_and_incomplete() {
    let now = instant("2025-08-05T10:00:00");
    assert!(is_overdue(&todo(Some("2025-08-04"), None, false), now));
    assert!(!is_overdue(&todo(Some("2025-08-04"), None, true), now));
    assert!(!is_overdue(&todo(Some("2025-08-05"), None, false), now));
    assert!(!is_overdue(&todo(None, None, false), now));
}

#[test]
fn due_today_ignores_completion() {
    let now = instant("2025-08-05T10:00:00");
    assert!(is_due_today(&todo(Some("2025-08-05"), None, false), now));
    assert!(is_due_today(&todo(Some("2025-08-05"), None, true), now));
    assert!(!is_due_today(&todo(Some("2025-08-06"), None, false), now));
    assert!(!is_due_today(&todo(None, None, false), now));
}

#[test]
fn reminder_active_boundary_is_inclusive() {
    let now = instant("2025-08-05T10:00:00");
    assert!(is_reminder_active(
        &todo(None, Some("2025-08-05T10:00:00"), false),
        now
    ));
    assert!(is_reminder_active(
        &todo(None, Some("2025-08-05T09:59:59"), false),
        now
    ));
    assert!(!is_reminder_active(
        &todo(None, Some("2025-08-05T10:00:01"), false),
        now
    ));
}

#[test]
fn completed_todo_never_has_an_active_reminder() {
    let now = instant("2025-08-05T10:00:00");
    assert!(!is_reminder_active(
        &todo(None, Some("2025-08-01T00:00:00"), true),
        now
    ));
}

#[test]
fn end_of_day_is_the_last_millisecond() {
    let eod = end_of_day(date("2025-08-05"));
    assert_eq!(eod, instant("2025-08-05T23:59:59") + chrono::Duration::milliseconds(999));
}

#[test]
fn reminder_precedes_due_date_is_strict() {
    let due = date("2025-08-05");
    assert!(reminder_precedes_due_date(due, instant("2025-08-05T23:59:59")));
    assert!(reminder_precedes_due_date(due, instant("2025-08-04T10:00:00")));
    assert!(!reminder_precedes_due_date(due, end_of_day(due)));
    assert!(!reminder_precedes_due_date(due, instant("2025-08-06T00:00:00")));
}
