//! Temporal rules.
//!
//! Pure functions over a caller-supplied `now`; nothing here reads the wall
//! clock. These predicates are the single definition of overdue, due-today
//! and reminder-active state for every other component.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::todo::Todo;

/// Calendar date of the supplied instant.
pub fn today(now: NaiveDateTime) -> NaiveDate {
    now.date()
}

/// Last representable instant of the given calendar day (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .expect("23:59:59.999 is valid on every calendar day")
}

/// True when `date` lies strictly before today.
pub fn is_past_date(date: NaiveDate, now: NaiveDateTime) -> bool {
    date < today(now)
}

/// True when the todo has a due date before today and is not completed.
pub fn is_overdue(todo: &Todo, now: NaiveDateTime) -> bool {
    match todo.due_date {
        Some(due_date) => due_date < today(now) && !todo.completed,
        None => false,
    }
}

/// True when the todo is due on the current calendar day, completed or not.
pub fn is_due_today(todo: &Todo, now: NaiveDateTime) -> bool {
    todo.due_date == Some(today(now))
}

/// True when an incomplete todo's reminder instant has elapsed.
///
/// The boundary is inclusive: a reminder equal to `now` is active, matching
/// the validation gate's rejection of `reminder <= now` on write.
pub fn is_reminder_active(todo: &Todo, now: NaiveDateTime) -> bool {
    match todo.reminder {
        Some(reminder) => !todo.completed && reminder <= now,
        None => false,
    }
}

/// True when the reminder fires strictly before the due date's end of day.
pub fn reminder_precedes_due_date(due_date: NaiveDate, reminder: NaiveDateTime) -> bool {
    reminder < end_of_day(due_date)
}
