//! Validation gate for todo creates and updates.
//!
//! # Responsibility
//! - Reject invalid text and temporal fields before they reach the store.
//! - Normalize accepted input into an insertion-ready payload.
//!
//! # Invariants
//! - No side effects; the gate only inspects and returns.
//! - A rejected operation changes nothing (all-or-nothing per call).
//! - Update checks run only for fields present in the patch: an unchanged
//!   due date lapsing into the past is the overdue state, never an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::todo::{NewTodo, Todo, TodoPatch};
use crate::time::rules::{is_past_date, reminder_precedes_due_date, today};

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejection reasons for proposed creates and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Text is empty after trimming.
    EmptyText,
    /// A newly written due date lies before today.
    PastDueDate {
        due_date: NaiveDate,
        today: NaiveDate,
    },
    /// A newly written reminder is not in the future.
    PastReminder {
        reminder: NaiveDateTime,
        now: NaiveDateTime,
    },
    /// Reminder does not precede the due date's end of day.
    ReminderAfterDueDate {
        due_date: NaiveDate,
        reminder: NaiveDateTime,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text cannot be empty"),
            Self::PastDueDate { due_date, today } => write!(
                f,
                "due date {due_date} cannot be in the past (today is {today})"
            ),
            Self::PastReminder { reminder, .. } => {
                write!(f, "reminder {reminder} cannot be in the past")
            }
            Self::ReminderAfterDueDate { due_date, reminder } => write!(
                f,
                "reminder {reminder} must be before the end of due date {due_date}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Validates a proposed create and returns the normalized payload.
///
/// # Contract
/// - `EmptyText` when `text` trims to nothing, regardless of other fields.
/// - `PastDueDate` when a due date lies before `now`'s calendar day.
/// - `PastReminder` when `reminder <= now`.
/// - `ReminderAfterDueDate` when both are set and the reminder does not fall
///   strictly before the due date at 23:59:59.999.
pub fn validate_create(
    text: &str,
    due_date: Option<NaiveDate>,
    reminder: Option<NaiveDateTime>,
    photo: Option<String>,
    now: NaiveDateTime,
) -> ValidationResult<NewTodo> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }

    if let Some(due_date) = due_date {
        if is_past_date(due_date, now) {
            return Err(ValidationError::PastDueDate {
                due_date,
                today: today(now),
            });
        }
    }

    if let Some(reminder) = reminder {
        if reminder <= now {
            return Err(ValidationError::PastReminder { reminder, now });
        }
    }

    if let (Some(due_date), Some(reminder)) = (due_date, reminder) {
        if !reminder_precedes_due_date(due_date, reminder) {
            return Err(ValidationError::ReminderAfterDueDate { due_date, reminder });
        }
    }

    Ok(NewTodo {
        text: trimmed.to_string(),
        due_date,
        reminder,
        photo,
    })
}

/// Validates a patch against the existing record.
///
/// Only checks relevant to fields present in the patch run. A patched
/// reminder validates against the patched due date when present, otherwise
/// against `existing.due_date`, and symmetrically for a patched due date.
pub fn validate_update(
    existing: &Todo,
    patch: &TodoPatch,
    now: NaiveDateTime,
) -> ValidationResult<()> {
    if let Some(text) = &patch.text {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
    }

    if !patch.touches_schedule() {
        return Ok(());
    }

    if let Some(Some(due_date)) = patch.due_date {
        if is_past_date(due_date, now) {
            return Err(ValidationError::PastDueDate {
                due_date,
                today: today(now),
            });
        }
    }

    if let Some(Some(reminder)) = patch.reminder {
        if reminder <= now {
            return Err(ValidationError::PastReminder { reminder, now });
        }
    }

    let effective_due = patch.due_date.unwrap_or(existing.due_date);
    let effective_reminder = patch.reminder.unwrap_or(existing.reminder);
    if let (Some(due_date), Some(reminder)) = (effective_due, effective_reminder) {
        if !reminder_precedes_due_date(due_date, reminder) {
            return Err(ValidationError::ReminderAfterDueDate { due_date, reminder });
        }
    }

    Ok(())
}
