use chrono::{NaiveDate, NaiveDateTime};
use ticklist_core::{filter_by_date, filter_by_status, project_month, step_month, StatusFilter, Todo};

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn instant(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn todo(id: i64, due_date: Option<&str>, completed: bool) -> Todo {
    Todo {
        id,
        text: format!("task {id}"),
        completed,
        due_date: due_date.map(date),
        reminder: None,
        photo: None,
        created_at: instant("2025-08-01T00:00:00"),
    }
}

fn sample() -> Vec<Todo> {
    vec![
        todo(1, Some("2025-08-04"), false), // overdue
        todo(2, Some("2025-08-05"), false), // due today
        todo(3, Some("2025-08-05"), true),  // due today, completed
        todo(4, Some("2025-08-20"), false), // upcoming
        todo(5, None, true),                // dateless, completed
        todo(6, Some("2025-08-04"), true),  // past but completed: not overdue
    ]
}

#[test]
fn status_filters_match_their_definitions() {
    let todos = sample();
    let now = instant("2025-08-05T12:00:00");

    let ids = |status| -> Vec<i64> {
        filter_by_status(&todos, status, now)
            .iter()
            .map(|t| t.id)
            .collect()
    };

    assert_eq!(ids(StatusFilter::All), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(ids(StatusFilter::Active), vec![1, 2, 4]);
    assert_eq!(ids(StatusFilter::Completed), vec![3, 5, 6]);
    assert_eq!(ids(StatusFilter::Today), vec![2, 3]);
    assert_eq!(ids(StatusFilter::Overdue), vec![1]);
}

#[test]
fn filtering_is_idempotent() {
    let todos = sample();
    let now = instant("2025-08-05T12:00:00");

    for status in [
        StatusFilter::All,
        StatusFilter::Active,
        StatusFilter::Completed,
        StatusFilter::Today,
        StatusFilter::Overdue,
    ] {
        let once: Vec<Todo> = filter_by_status(&todos, status, now)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Todo> = filter_by_status(&once, status, now)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice, "filter {status:?} is not idempotent");
    }
}

#[test]
fn filter_by_date_includes_any_completion_state() {
    let todos = sample();
    let on_day: Vec<i64> = filter_by_date(&todos, date("2025-08-05"))
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(on_day, vec![2, 3]);
    assert!(filter_by_date(&todos, date("2025-12-25")).is_empty());
}

#[test]
fn status_parse_roundtrip() {
    for status in ["all", "active", "completed", "today", "overdue"] {
        assert_eq!(StatusFilter::parse(status).unwrap().as_str(), status);
    }
    assert_eq!(StatusFilter::parse(" Today "), Some(StatusFilter::Today));
    assert_eq!(StatusFilter::parse("due-soon"), None);
}

#[test]
fn month_projection_counts_sum_to_month_total() {
    let todos = sample();
    let view = project_month(&todos, 2025, 8).unwrap();

    assert_eq!(view.days_in_month(), 31);
    assert_eq!(view.total(), 5); // ids 1,2,3,4,6 fall in August
    assert_eq!(view.count_on(4), 2);
    assert_eq!(view.count_on(5), 2);
    assert_eq!(view.count_on(20), 1);
    assert_eq!(view.count_on(21), 0);
}

#[test]
fn month_projection_weekday_offset_uses_sunday_zero() {
    // 2025-08-01 is a Friday.
    let view = project_month(&[], 2025, 8).unwrap();
    assert_eq!(view.leading_weekday, 5);

    // 2026-02-01 is a Sunday.
    let view = project_month(&[], 2026, 2).unwrap();
    assert_eq!(view.leading_weekday, 0);
}

#[test]
fn february_handles_leap_and_common_years() {
    let todos = vec![
        todo(1, Some("2024-02-29"), false),
        todo(2, Some("2024-02-01"), true),
        todo(3, Some("2025-02-28"), false),
    ];

    let leap = project_month(&todos, 2024, 2).unwrap();
    assert_eq!(leap.days_in_month(), 29);
    assert_eq!(leap.count_on(29), 1);
    assert_eq!(leap.total(), 2);

    let common = project_month(&todos, 2025, 2).unwrap();
    assert_eq!(common.days_in_month(), 28);
    assert_eq!(common.total(), 1);
}

#[test]
fn invalid_months_project_to_none() {
    assert!(project_month(&[], 2025, 0).is_none());
    assert!(project_month(&[], 2025, 13).is_none());
}

#[test]
fn step_month_crosses_year_boundaries() {
    assert_eq!(step_month(2025, 8, 1), (2025, 9));
    assert_eq!(step_month(2025, 12, 1), (2026, 1));
    assert_eq!(step_month(2025, 1, -1), (2024, 12));
    assert_eq!(step_month(2025, 8, -20), (2023, 12));
    assert_eq!(step_month(2025, 8, 0), (2025, 8));
}
