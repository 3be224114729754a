//! User profile model.
//!
//! Auxiliary to the todo list: persisted as its own document and carrying no
//! relationship to any todo.

use serde::{Deserialize, Serialize};

/// Single-user profile record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name; may be empty.
    #[serde(default)]
    pub username: String,
    /// Opaque avatar image reference.
    #[serde(default)]
    pub avatar: Option<String>,
}
