//! JSON file document store.
//!
//! Two documents under one data directory: `todos.json` and `profile.json`.
//! A missing file loads as the empty default; a present but malformed file
//! is an error, never silently discarded data.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{PersistError, PersistResult, Persistence};
use crate::model::profile::UserProfile;
use crate::model::todo::Todo;

const TODOS_FILE: &str = "todos.json";
const PROFILE_FILE: &str = "profile.json";

/// Whole-document JSON persistence rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Uses an existing directory without touching the filesystem.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the data directory if needed and returns the store.
    pub fn open(dir: impl Into<PathBuf>) -> PersistResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| PersistError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load_document<T>(&self, name: &str) -> PersistResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.dir.join(name);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
            Err(source) => return Err(PersistError::Io { path, source }),
        };
        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| PersistError::Codec { path, source })
    }

    fn save_document<T: Serialize>(&self, name: &str, value: &T) -> PersistResult<()> {
        let path = self.dir.join(name);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| PersistError::Io {
                path: path.clone(),
                source,
            })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value).map_err(|source| PersistError::Codec {
            path: path.clone(),
            source,
        })?;
        writer.flush().map_err(|source| PersistError::Io { path, source })
    }
}

impl Persistence for JsonFileStore {
    fn load_todos(&self) -> PersistResult<Vec<Todo>> {
        self.load_document(TODOS_FILE)
    }

    fn save_todos(&self, todos: &[Todo]) -> PersistResult<()> {
        self.save_document(TODOS_FILE, &todos)
    }

    fn load_profile(&self) -> PersistResult<UserProfile> {
        self.load_document(PROFILE_FILE)
    }

    fn save_profile(&self, profile: &UserProfile) -> PersistResult<()> {
        self.save_document(PROFILE_FILE, profile)
    }
}
