//! Filter and calendar projection engine.
//!
//! # Responsibility
//! - Derive status/date views over a todo snapshot without mutating it.
//! - Project monthly due-date density for calendar rendering.
//!
//! # Invariants
//! - Filtering never reorders: results keep the snapshot's insertion order.
//! - Month projections account for 28-31 day months and leap years.
//! - Weekday offsets use the 0=Sunday..6=Saturday convention.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::model::todo::Todo;
use crate::time::rules::{is_overdue, today};

/// Status facets over the todo list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
    /// Due on the current calendar day, completed or not.
    Today,
    /// Due date in the past and not completed.
    Overdue,
}

impl StatusFilter {
    /// Parses the user-facing filter name; `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "today" => Some(Self::Today),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Today => "today",
            Self::Overdue => "overdue",
        }
    }
}

/// Returns the todos matching `status`, evaluated against a single `now`.
pub fn filter_by_status<'a>(
    todos: &'a [Todo],
    status: StatusFilter,
    now: NaiveDateTime,
) -> Vec<&'a Todo> {
    let today = today(now);
    todos
        .iter()
        .filter(|todo| match status {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
            StatusFilter::Today => todo.due_date == Some(today),
            StatusFilter::Overdue => is_overdue(todo, now),
        })
        .collect()
}

/// Returns every todo due on `date`, in any completion state.
pub fn filter_by_date<'a>(todos: &'a [Todo], date: NaiveDate) -> Vec<&'a Todo> {
    todos
        .iter()
        .filter(|todo| todo.due_date == Some(date))
        .collect()
}

/// Per-day due-date density for one calendar month.
///
/// Exposes counts only, so calendar rendering never needs full todo
/// contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
    /// Weekday of day 1 (0=Sunday..6=Saturday).
    pub leading_weekday: u32,
    /// Count of todos due on each day; index 0 is day 1.
    pub day_counts: Vec<u32>,
}

impl MonthView {
    pub fn days_in_month(&self) -> u32 {
        self.day_counts.len() as u32
    }

    /// Count for a 1-based day; 0 for days outside the month.
    pub fn count_on(&self, day: u32) -> u32 {
        day.checked_sub(1)
            .and_then(|index| self.day_counts.get(index as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of todos due within the month.
    pub fn total(&self) -> u32 {
        self.day_counts.iter().sum()
    }
}

/// Projects due-date counts for the given month.
///
/// Returns `None` when `year`/`month` does not name a valid calendar month.
pub fn project_month(todos: &[Todo], year: i32, month: u32) -> Option<MonthView> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = step_month(year, month, 1);
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    let days = next_first.signed_duration_since(first).num_days() as usize;

    let mut day_counts = vec![0u32; days];
    for todo in todos {
        if let Some(due_date) = todo.due_date {
            if due_date.year() == year && due_date.month() == month {
                day_counts[(due_date.day() - 1) as usize] += 1;
            }
        }
    }

    Some(MonthView {
        year,
        month,
        leading_weekday: first.weekday().num_days_from_sunday(),
        day_counts,
    })
}

/// Steps a (year, month) pair by `delta` months, crossing year boundaries.
pub fn step_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let year = index.div_euclid(12) as i32;
    let month = (index.rem_euclid(12) + 1) as u32;
    (year, month)
}
