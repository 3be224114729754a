//! Reminder scheduler and notifier capability.
//!
//! # Responsibility
//! - Scan todo snapshots for newly elapsed reminders and notify once each.
//! - Run the scan on a fixed interval with an explicit start/stop contract.
//!
//! # Invariants
//! - At most one notification per todo id per process lifetime.
//! - The scheduler only reads todos and writes its own fired-set; it never
//!   mutates todo fields.
//! - Completed todos are never notified, regardless of elapsed time.

use std::collections::HashSet;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::NaiveDateTime;
use log::{debug, info, warn};

use crate::model::todo::{Todo, TodoId};
use crate::time::clock::Clock;
use crate::time::rules::is_reminder_active;

/// Single-method notification capability.
///
/// Implemented per target: desktop notification, log line, push message.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

/// Notifier that emits reminders as structured log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        info!("event=reminder_notify module=remind title={title:?} body={body:?}");
    }
}

/// Observable reminder lifecycle state for one todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    /// No reminder, or the reminder lies in the future.
    Dormant,
    /// Reminder elapsed, todo incomplete, not yet notified.
    Active,
    /// Notified at least once; terminal while the todo stays incomplete.
    Fired,
    /// Todo completed; a pending reminder will never fire.
    Suppressed,
}

/// Tick-driven reminder scanner owning the process-local fired-set.
///
/// The fired-set survives completion and deletion of its todos (a harmless
/// leak bounded by the todos created within one process lifetime) and is
/// cleared only by process restart.
#[derive(Debug, Default)]
pub struct ReminderScheduler {
    fired: HashSet<TodoId>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates one tick over a snapshot and returns the emission count.
    ///
    /// Emits exactly one notification for every todo whose reminder is
    /// active and whose id has not fired before.
    pub fn tick(&mut self, todos: &[Todo], now: NaiveDateTime, notifier: &dyn Notifier) -> usize {
        let mut emitted = 0;
        for todo in todos {
            if is_reminder_active(todo, now) && self.fired.insert(todo.id) {
                notifier.notify("Todo Reminder", &todo.text);
                emitted += 1;
            }
        }
        emitted
    }

    pub fn has_fired(&self, id: TodoId) -> bool {
        self.fired.contains(&id)
    }

    /// Derives the lifecycle state of one todo at `now`.
    pub fn state_of(&self, todo: &Todo, now: NaiveDateTime) -> ReminderState {
        if todo.completed {
            ReminderState::Suppressed
        } else if self.fired.contains(&todo.id) {
            ReminderState::Fired
        } else if is_reminder_active(todo, now) {
            ReminderState::Active
        } else {
            ReminderState::Dormant
        }
    }
}

/// Running scheduler loop; stopping is explicit, dropping also stops it.
pub struct SchedulerHandle {
    stop_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Stops the loop and waits for the worker to finish.
    pub fn stop(mut self) {
        let _ = self.stop_tx.send(());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("event=scheduler_stop module=remind status=error detail=worker_panicked");
            }
        }
    }
}

/// Starts the periodic reminder loop on a background thread.
///
/// Ticks once immediately, then every `interval`. `snapshot` supplies a
/// fresh consistent copy of the todos for each tick, so user edits never
/// race the scan. The loop exits promptly on `SchedulerHandle::stop` (or
/// when the handle is dropped) instead of sleeping out the interval.
pub fn spawn<S, C, N>(interval: Duration, snapshot: S, clock: C, notifier: N) -> SchedulerHandle
where
    S: Fn() -> Vec<Todo> + Send + 'static,
    C: Clock + Send + 'static,
    N: Notifier + Send + 'static,
{
    let (stop_tx, stop_rx) = mpsc::channel();
    let thread = thread::spawn(move || {
        info!(
            "event=scheduler_start module=remind status=ok interval_secs={}",
            interval.as_secs()
        );
        let mut scheduler = ReminderScheduler::new();
        loop {
            let emitted = scheduler.tick(&snapshot(), clock.now(), &notifier);
            if emitted > 0 {
                debug!("event=scheduler_tick module=remind emitted={emitted}");
            }
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        info!("event=scheduler_stop module=remind status=ok");
    });

    SchedulerHandle {
        stop_tx,
        thread: Some(thread),
    }
}
