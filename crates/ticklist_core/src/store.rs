//! In-memory todo record store.
//!
//! # Responsibility
//! - Hold the live, insertion-ordered todo collection for one session.
//! - Own id allocation so uniqueness has a single authority.
//!
//! # Invariants
//! - Ids are pairwise distinct across any sequence of inserts and deletes.
//! - `patch` merges only the provided fields; every mutation is applied
//!   whole or not at all.
//! - Creation goes through the validation gate: `insert` only accepts the
//!   gate's `NewTodo` payload, never a raw record.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;

use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure: the only recoverable condition is an unknown id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    NotFound(TodoId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Ordered in-memory collection of todos with monotonic id allocation.
#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: TodoId,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a store from persisted records, preserving their order.
    ///
    /// The allocator is seeded above the highest loaded id so documents
    /// written by earlier runs (including timestamp-based ids) stay valid.
    pub fn from_records(records: Vec<Todo>) -> Self {
        let next_id = records
            .iter()
            .map(|todo| todo.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self {
            todos: records,
            next_id,
        }
    }

    /// Inserts a validated draft and returns the stored record.
    pub fn insert(&mut self, draft: NewTodo, created_at: NaiveDateTime) -> Todo {
        let todo = Todo {
            id: self.allocate_id(),
            text: draft.text,
            completed: false,
            due_date: draft.due_date,
            reminder: draft.reminder,
            photo: draft.photo,
            created_at,
        };
        self.todos.push(todo.clone());
        todo
    }

    /// All live todos in insertion order.
    pub fn get_all(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn find_by_id(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Shallow-merges the patch into the record and returns the updated todo.
    pub fn patch(&mut self, id: TodoId, patch: &TodoPatch) -> StoreResult<Todo> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound(id))?;
        todo.apply(patch);
        Ok(todo.clone())
    }

    /// Removes and returns the todo with the given id.
    pub fn delete(&mut self, id: TodoId) -> StoreResult<Todo> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.todos.remove(index))
    }

    /// Removes every todo matching the predicate, preserving the order of
    /// the survivors, and returns the removed records.
    pub fn delete_where<F>(&mut self, mut predicate: F) -> Vec<Todo>
    where
        F: FnMut(&Todo) -> bool,
    {
        let (removed, kept): (Vec<Todo>, Vec<Todo>) =
            self.todos.drain(..).partition(|todo| predicate(todo));
        self.todos = kept;
        removed
    }

    // Monotonic counter, re-checked against live contents so loaded records
    // with arbitrary ids (including a saturated seed) can never collide with
    // a fresh allocation. Wraps back to 1 rather than overflowing.
    fn allocate_id(&mut self) -> TodoId {
        let mut id = self.next_id.max(1);
        while self.todos.iter().any(|todo| todo.id == id) {
            id = id.checked_add(1).unwrap_or(1);
        }
        self.next_id = id.saturating_add(1);
        id
    }
}
