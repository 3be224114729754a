//! Domain model for todos and the user profile.
//!
//! # Responsibility
//! - Define the canonical records shared by validation, store and persistence.
//! - Keep wire field names compatible with the persisted JSON documents.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId` assigned by the store.
//! - Deletion is hard delete; there are no tombstones in this model.

pub mod profile;
pub mod todo;
