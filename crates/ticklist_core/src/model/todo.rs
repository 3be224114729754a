//! Todo domain model.
//!
//! # Responsibility
//! - Define the central todo record and its patch/draft companions.
//! - Provide the shallow-merge semantics used by store patching.
//!
//! # Invariants
//! - `id` is unique across all live todos and never reassigned.
//! - `created_at` is set once at insertion and never changes.
//! - Temporal constraints (due date vs. reminder) are enforced by the
//!   validation gate before any value reaches this record.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Stable identifier for a todo.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Allocation is owned by the store's monotonic counter.
pub type TodoId = i64;

/// Canonical todo record.
///
/// Field names serialize in camelCase so documents written by earlier
/// versions keep loading unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Stable ID used as the sole lookup key.
    pub id: TodoId,
    /// Display text; non-empty after trimming.
    pub text: String,
    /// Completion flag. Completing never clears `due_date` or `reminder`.
    #[serde(default)]
    pub completed: bool,
    /// Optional date-only deadline. May lapse into the past while the todo
    /// sits incomplete; that is the overdue state, not invalid data.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Optional reminder instant; strictly before `due_date`'s end of day
    /// whenever both are set at write time.
    #[serde(default)]
    pub reminder: Option<NaiveDateTime>,
    /// Opaque binary-as-text reference; never inspected by the core.
    #[serde(default)]
    pub photo: Option<String>,
    /// Creation instant, immutable.
    pub created_at: NaiveDateTime,
}

impl Todo {
    /// Merges only the fields present in `patch`, leaving others untouched.
    ///
    /// Text is trimmed on write, matching create-time normalization.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(text) = &patch.text {
            self.text = text.trim().to_string();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(reminder) = patch.reminder {
            self.reminder = reminder;
        }
        if let Some(photo) = &patch.photo {
            self.photo = photo.clone();
        }
    }
}

/// Partial update for a todo.
///
/// Outer `Option` marks field presence in the patch; the inner `Option` on
/// clearable fields distinguishes "set to value" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<NaiveDate>>,
    pub reminder: Option<Option<NaiveDateTime>>,
    pub photo: Option<Option<String>>,
}

impl TodoPatch {
    /// Returns true when no field is present in the patch.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.completed.is_none()
            && self.due_date.is_none()
            && self.reminder.is_none()
            && self.photo.is_none()
    }

    /// Returns true when the patch touches `due_date` or `reminder`.
    ///
    /// Patches that touch neither skip temporal validation entirely, so
    /// completing or renaming never re-triggers past-date checks.
    pub fn touches_schedule(&self) -> bool {
        self.due_date.is_some() || self.reminder.is_some()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_reminder(mut self, reminder: Option<NaiveDateTime>) -> Self {
        self.reminder = Some(reminder);
        self
    }

    pub fn with_photo(mut self, photo: Option<String>) -> Self {
        self.photo = Some(photo);
        self
    }
}

/// Normalized insertion payload produced by the validation gate.
///
/// Constructed only through `validate::validate_create`, so the store can
/// trust its contents without re-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub(crate) text: String,
    pub(crate) due_date: Option<NaiveDate>,
    pub(crate) reminder: Option<NaiveDateTime>,
    pub(crate) photo: Option<String>,
}

impl NewTodo {
    /// Trimmed todo text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn reminder(&self) -> Option<NaiveDateTime> {
        self.reminder
    }
}
