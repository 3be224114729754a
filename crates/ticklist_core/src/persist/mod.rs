//! Persistence contracts and the JSON document implementation.
//!
//! # Responsibility
//! - Define the whole-document load/save boundary for todos and the profile.
//! - Keep file and codec details behind the `Persistence` trait.
//!
//! # Invariants
//! - Whole-document replace semantics; no partial patching at this boundary.
//! - Persistence runs as the final step of a mutation: a failed save leaves
//!   the in-memory store as the session's source of truth.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

use crate::model::profile::UserProfile;
use crate::model::todo::Todo;

mod json_file;

pub use json_file::JsonFileStore;

pub type PersistResult<T> = Result<T, PersistError>;

/// Failure while reading or writing a persisted document.
#[derive(Debug)]
pub enum PersistError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Codec {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to access `{}`: {source}", path.display())
            }
            Self::Codec { path, source } => {
                write!(f, "invalid document `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Codec { source, .. } => Some(source),
        }
    }
}

/// Durable whole-document storage for the todo list and the user profile.
pub trait Persistence {
    fn load_todos(&self) -> PersistResult<Vec<Todo>>;
    fn save_todos(&self, todos: &[Todo]) -> PersistResult<()>;
    fn load_profile(&self) -> PersistResult<UserProfile>;
    fn save_profile(&self, profile: &UserProfile) -> PersistResult<()>;
}
