//! Todo use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/clear entry points gated by validation.
//! - Hold the session view state: status filter, selected date, visible
//!   month.
//! - Persist as the final step of every mutation.
//!
//! # Invariants
//! - Each operation captures `now` exactly once and threads it through all
//!   temporal checks it performs.
//! - A rejected mutation changes neither the store nor the documents.
//! - A failed save degrades to a warning; the in-memory store remains the
//!   source of truth for the rest of the session.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::{info, warn};

use crate::filter::{filter_by_date, filter_by_status, project_month, step_month, MonthView, StatusFilter};
use crate::model::profile::UserProfile;
use crate::model::todo::{Todo, TodoId, TodoPatch};
use crate::persist::Persistence;
use crate::store::{StoreError, TodoStore};
use crate::time::clock::Clock;
use crate::time::rules::today;
use crate::validate::{validate_create, validate_update, ValidationError};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing failure for todo operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The proposed values were rejected by the validation gate.
    Validation(ValidationError),
    /// Unknown id on update or delete; reported, never fatal.
    NotFound(TodoId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

/// Result of a committed mutation.
///
/// `persist_warning` is set when the in-memory change applied but the
/// best-effort save failed; the caller may surface it without retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<T> {
    pub value: T,
    pub persist_warning: Option<String>,
}

/// Use-case facade over the store, validation gate and persistence.
pub struct TodoService<P: Persistence, C: Clock> {
    store: TodoStore,
    profile: UserProfile,
    persistence: P,
    clock: C,
    filter: StatusFilter,
    selected_date: Option<NaiveDate>,
    visible_year: i32,
    visible_month: u32,
}

impl<P: Persistence, C: Clock> TodoService<P, C> {
    /// Loads both documents and starts a session.
    ///
    /// A failed load is logged and degrades to empty defaults: a local tool
    /// must come up even when its documents are unreadable.
    pub fn open(persistence: P, clock: C) -> Self {
        let todos = match persistence.load_todos() {
            Ok(todos) => todos,
            Err(err) => {
                warn!("event=load_failed module=service document=todos detail={err}");
                Vec::new()
            }
        };
        let profile = match persistence.load_profile() {
            Ok(profile) => profile,
            Err(err) => {
                warn!("event=load_failed module=service document=profile detail={err}");
                UserProfile::default()
            }
        };

        let today = today(clock.now());
        info!(
            "event=session_open module=service status=ok todos={}",
            todos.len()
        );
        Self {
            store: TodoStore::from_records(todos),
            profile,
            persistence,
            clock,
            filter: StatusFilter::All,
            selected_date: None,
            visible_year: today.year(),
            visible_month: today.month(),
        }
    }

    /// Creates a todo through the validation gate.
    pub fn create(
        &mut self,
        text: &str,
        due_date: Option<NaiveDate>,
        reminder: Option<NaiveDateTime>,
        photo: Option<String>,
    ) -> ServiceResult<Committed<Todo>> {
        let now = self.clock.now();
        let draft = validate_create(text, due_date, reminder, photo, now)?;
        let todo = self.store.insert(draft, now);
        info!(
            "event=todo_created module=service id={} due_date={:?} reminder={:?}",
            todo.id, todo.due_date, todo.reminder
        );
        let persist_warning = self.persist_todos();
        Ok(Committed {
            value: todo,
            persist_warning,
        })
    }

    /// Applies a partial update after re-validating the touched fields.
    pub fn update(&mut self, id: TodoId, patch: TodoPatch) -> ServiceResult<Committed<Todo>> {
        let now = self.clock.now();
        let existing = self
            .store
            .find_by_id(id)
            .ok_or(ServiceError::NotFound(id))?;
        validate_update(existing, &patch, now)?;

        let todo = self.store.patch(id, &patch)?;
        info!("event=todo_updated module=service id={id}");
        let persist_warning = self.persist_todos();
        Ok(Committed {
            value: todo,
            persist_warning,
        })
    }

    /// Deletes by id and returns the removed record.
    pub fn delete(&mut self, id: TodoId) -> ServiceResult<Committed<Todo>> {
        let todo = self.store.delete(id)?;
        info!("event=todo_deleted module=service id={id}");
        let persist_warning = self.persist_todos();
        Ok(Committed {
            value: todo,
            persist_warning,
        })
    }

    /// Removes every completed todo and returns the removed records.
    pub fn clear_completed(&mut self) -> Committed<Vec<Todo>> {
        let removed = self.store.delete_where(|todo| todo.completed);
        let persist_warning = if removed.is_empty() {
            None
        } else {
            info!(
                "event=todos_cleared module=service removed={}",
                removed.len()
            );
            self.persist_todos()
        };
        Committed {
            value: removed,
            persist_warning,
        }
    }

    /// All live todos in insertion order.
    pub fn todos(&self) -> &[Todo] {
        self.store.get_all()
    }

    pub fn find(&self, id: TodoId) -> Option<&Todo> {
        self.store.find_by_id(id)
    }

    /// Owned snapshot for the reminder scheduler.
    pub fn snapshot(&self) -> Vec<Todo> {
        self.store.get_all().to_vec()
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Todos matching the session's current status filter.
    pub fn filtered_todos(&self) -> Vec<Todo> {
        let now = self.clock.now();
        filter_by_status(self.store.get_all(), self.filter, now)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Todos due on the selected calendar date; empty when none is selected.
    pub fn selected_date_todos(&self) -> Vec<Todo> {
        match self.selected_date {
            Some(date) => filter_by_date(self.store.get_all(), date)
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Moves the visible month by `delta` and returns the new projection.
    ///
    /// The stepped year is clamped to chrono's representable range (keeping a
    /// neighbor year on each side for projection arithmetic), so any `i32`
    /// delta lands on a valid month.
    pub fn navigate_month(&mut self, delta: i32) -> MonthView {
        let (year, month) = step_month(self.visible_year, self.visible_month, delta);
        self.visible_year = year.clamp(NaiveDate::MIN.year() + 1, NaiveDate::MAX.year() - 1);
        self.visible_month = month;
        self.month_view()
    }

    /// Due-date density for the currently visible month.
    pub fn month_view(&self) -> MonthView {
        project_month(self.store.get_all(), self.visible_year, self.visible_month)
            .expect("visible month is seeded from today and clamped on navigation")
    }

    /// Number of todos still open; the "items left" counter.
    pub fn active_count(&self) -> usize {
        self.store
            .get_all()
            .iter()
            .filter(|todo| !todo.completed)
            .count()
    }

    pub fn has_completed(&self) -> bool {
        self.store.get_all().iter().any(|todo| todo.completed)
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn set_username(&mut self, username: &str) -> Committed<()> {
        self.profile.username = username.trim().to_string();
        Committed {
            value: (),
            persist_warning: self.persist_profile(),
        }
    }

    pub fn set_avatar(&mut self, avatar: Option<String>) -> Committed<()> {
        self.profile.avatar = avatar;
        Committed {
            value: (),
            persist_warning: self.persist_profile(),
        }
    }

    fn persist_todos(&self) -> Option<String> {
        match self.persistence.save_todos(self.store.get_all()) {
            Ok(()) => None,
            Err(err) => {
                warn!("event=save_failed module=service document=todos detail={err}");
                Some(err.to_string())
            }
        }
    }

    fn persist_profile(&self) -> Option<String> {
        match self.persistence.save_profile(&self.profile) {
            Ok(()) => None,
            Err(err) => {
                warn!("event=save_failed module=service document=profile detail={err}");
                Some(err.to_string())
            }
        }
    }
}
