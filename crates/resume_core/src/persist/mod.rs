//! Persistence adapter contract and implementations.
//!
//! # Responsibility
//! - Define the load/save contract the document store requires.
//! - Provide JSON-file, SQLite and in-memory adapters over one codec.
//!
//! # Invariants
//! - `save` always writes the full state; there are no partial writes.
//! - `load` skips malformed documents instead of failing the collection.
//! - A failed `save` never affects in-memory state; the store reports it.

use crate::db::DbError;
use crate::store::state::StoreState;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileAdapter;
pub use memory::MemoryAdapter;
pub use sqlite::SqliteAdapter;

pub type PersistResult<T> = Result<T, PersistError>;

/// Load/save backend for the whole store state.
pub trait PersistenceAdapter {
    /// Short backend label used in log events.
    fn backend(&self) -> &'static str;

    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&mut self) -> PersistResult<Option<StoreState>>;

    fn save(&mut self, state: &StoreState) -> PersistResult<()>;
}

#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Db(DbError),
    /// Backend refused the write (used by the in-memory adapter).
    Rejected(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage i/o failed: {err}"),
            Self::Json(err) => write!(f, "stored state is not valid json: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Rejected(message) => write!(f, "save rejected: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
