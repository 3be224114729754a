//! Core domain logic for ticklist.
//! This crate is the single source of truth for business invariants.

pub mod filter;
pub mod logging;
pub mod model;
pub mod persist;
pub mod remind;
pub mod service;
pub mod store;
pub mod time;
pub mod validate;

pub use filter::{
    filter_by_date, filter_by_status, project_month, step_month, MonthView, StatusFilter,
};
pub use logging::{default_log_level, init_logging};
pub use model::profile::UserProfile;
pub use model::todo::{NewTodo, Todo, TodoId, TodoPatch};
pub use persist::{JsonFileStore, PersistError, PersistResult, Persistence};
pub use remind::{LogNotifier, Notifier, ReminderScheduler, ReminderState, SchedulerHandle};
pub use service::todo_service::{Committed, ServiceError, ServiceResult, TodoService};
pub use store::{StoreError, StoreResult, TodoStore};
pub use time::clock::{Clock, ManualClock, SystemClock};
pub use validate::{validate_create, validate_update, ValidationError, ValidationResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
