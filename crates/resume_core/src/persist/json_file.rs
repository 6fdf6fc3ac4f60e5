//! Single-file JSON adapter.
//!
//! # Invariants
//! - The state file is replaced by rename, so a crash mid-write leaves the
//!   previous state file intact.
//! - A missing file means "nothing stored yet", not an error.

use super::codec::{decode_state, encode_state};
use super::{PersistResult, PersistenceAdapter};
use crate::store::state::StoreState;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileAdapter {
    path: PathBuf,
}

impl JsonFileAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl PersistenceAdapter for JsonFileAdapter {
    fn backend(&self) -> &'static str {
        "json"
    }

    fn load(&mut self) -> PersistResult<Option<StoreState>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode_state(&raw).map(Some)
    }

    fn save(&mut self, state: &StoreState) -> PersistResult<()> {
        let encoded = encode_state(state)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let staging = self.staging_path();
        fs::write(&staging, encoded.as_bytes())?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}
