//! SQLite adapter.
//!
//! # Responsibility
//! - Store one row per document (JSON body) plus store-level preferences
//!   in `store_meta`.
//!
//! # Invariants
//! - `save` replaces every row inside one transaction.
//! - Rows whose body fails to decode are skipped on load, not repaired.
//!
//! # See also
//! - `db::migrations` for the schema.

use super::codec::{assemble_state, encode_document};
use super::{PersistResult, PersistenceAdapter};
use crate::db::{open_db, open_db_in_memory};
use crate::store::state::StoreState;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

const META_CURRENT_RESUME_ID: &str = "current_resume_id";
const META_PAGE_WRAP: &str = "page_wrap";

pub struct SqliteAdapter {
    conn: Connection,
}

impl SqliteAdapter {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> PersistResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already-migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn load_rows(&self) -> PersistResult<Vec<(String, Value)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM resumes ORDER BY id ASC;")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, body) = row?;
            // Unparseable bodies become `Null`, which the codec drops and logs.
            let value = serde_json::from_str(&body).unwrap_or(Value::Null);
            documents.push((id, value));
        }
        Ok(documents)
    }

    fn load_meta(&self) -> PersistResult<BTreeMap<String, String>> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM store_meta;")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut meta = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            meta.insert(key, value);
        }
        Ok(meta)
    }
}

impl PersistenceAdapter for SqliteAdapter {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn load(&mut self) -> PersistResult<Option<StoreState>> {
        let documents = self.load_rows()?;
        let meta = self.load_meta()?;
        if documents.is_empty() && meta.is_empty() {
            return Ok(None);
        }

        let current_resume_id = meta.get(META_CURRENT_RESUME_ID).cloned();
        let page_wrap = meta
            .get(META_PAGE_WRAP)
            .is_some_and(|value| value == "true");
        Ok(Some(assemble_state(documents, current_resume_id, page_wrap)))
    }

    fn save(&mut self, state: &StoreState) -> PersistResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM resumes;", [])?;
        {
            let mut insert =
                tx.prepare("INSERT INTO resumes (id, updated_at, body) VALUES (?1, ?2, ?3);")?;
            for (id, document) in state.resumes().iter() {
                insert.execute(params![
                    id,
                    document.metadata.updated_at,
                    encode_document(document)?
                ])?;
            }
        }

        match state.current_resume_id() {
            Some(id) => {
                tx.execute(
                    "INSERT INTO store_meta (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
                    params![META_CURRENT_RESUME_ID, id],
                )?;
            }
            None => {
                tx.execute(
                    "DELETE FROM store_meta WHERE key = ?1;",
                    params![META_CURRENT_RESUME_ID],
                )?;
            }
        }
        tx.execute(
            "INSERT INTO store_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![META_PAGE_WRAP, if state.page_wrap() { "true" } else { "false" }],
        )?;

        tx.commit()?;
        Ok(())
    }
}
