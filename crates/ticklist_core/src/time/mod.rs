//! Time sources and temporal predicates.
//!
//! # Responsibility
//! - Provide the injectable clock abstraction used by services and the
//!   reminder scheduler.
//! - Provide the pure rules deriving overdue/due-today/reminder-active state.
//!
//! # Invariants
//! - All timestamps use one consistent naive local representation; no
//!   timezone normalization happens anywhere in the core.
//! - Every logical operation captures `now` exactly once and threads it
//!   through all predicates it evaluates.

pub mod clock;
pub mod rules;
