//! Clock abstraction.
//!
//! The scheduler and the service never call `Local::now()` directly; they
//! take a `Clock` so tests can simulate the passage of time deterministically
//! instead of waiting on real timers.

use chrono::{Duration, Local, NaiveDateTime};
use std::sync::{Arc, Mutex, PoisonError};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock> Clock for Arc<C> {
    fn now(&self) -> NaiveDateTime {
        self.as_ref().now()
    }
}

/// Wall-clock time in the process-local representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable clock for deterministic tests.
///
/// Shared across threads via `Arc<ManualClock>`; `set`/`advance` take `&self`
/// so a test can move time forward while a scheduler loop holds a clone.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.lock() = now;
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.lock();
        *now += delta;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDateTime> {
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.lock()
    }
}
