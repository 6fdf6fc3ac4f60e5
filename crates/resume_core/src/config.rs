//! Runtime configuration for the resume store.
//!
//! # Responsibility
//! - Collect data directory, storage backend, log level and document
//!   defaults in one value.
//! - Build the configured persistence adapter.
//!
//! # Invariants
//! - `default_template_id` always passes template id validation.
//! - Environment overrides are optional; unset variables keep defaults.

use crate::persist::{JsonFileAdapter, PersistError, PersistenceAdapter, SqliteAdapter};
use crate::render::is_valid_template_id;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const JSON_STATE_FILE_NAME: &str = "resumes.json";
pub const SQLITE_FILE_NAME: &str = "resumes.sqlite3";
pub const DEFAULT_TEMPLATE_ID: &str = "classic";
pub const DEFAULT_SEED_DOCUMENT_NAME: &str = "Untitled resume";

const ENV_DATA_DIR: &str = "RESUME_DATA_DIR";
const ENV_STORAGE: &str = "RESUME_STORAGE";
const ENV_LOG_LEVEL: &str = "RESUME_LOG_LEVEL";
const ENV_DEFAULT_TEMPLATE: &str = "RESUME_DEFAULT_TEMPLATE";
const ENV_SEED_NAME: &str = "RESUME_SEED_NAME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(ConfigError::UnsupportedBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedBackend(String),
    InvalidTemplateId(String),
    EmptyDataDir,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBackend(value) => {
                write!(f, "unsupported storage backend `{value}`; expected json|sqlite")
            }
            Self::InvalidTemplateId(value) => {
                write!(f, "invalid default template id `{value}`")
            }
            Self::EmptyDataDir => write!(f, "data directory cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the state file and logs.
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Template assigned to newly created documents.
    pub default_template_id: String,
    /// Name given to the document seeded into an empty store.
    pub seed_document_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: StorageBackend::Json,
            log_level: crate::logging::default_log_level().to_string(),
            default_template_id: DEFAULT_TEMPLATE_ID.to_string(),
            seed_document_name: DEFAULT_SEED_DOCUMENT_NAME.to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `RESUME_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            if dir.trim().is_empty() {
                return Err(ConfigError::EmptyDataDir);
            }
            config.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(backend) = lookup(ENV_STORAGE) {
            config.backend = backend.parse()?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_string();
        }
        if let Some(template_id) = lookup(ENV_DEFAULT_TEMPLATE) {
            let template_id = template_id.trim().to_string();
            if !is_valid_template_id(&template_id) {
                return Err(ConfigError::InvalidTemplateId(template_id));
            }
            config.default_template_id = template_id;
        }
        if let Some(name) = lookup(ENV_SEED_NAME) {
            if !name.trim().is_empty() {
                config.seed_document_name = name.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Path of the state file for the configured backend.
    pub fn state_path(&self) -> PathBuf {
        match self.backend {
            StorageBackend::Json => self.data_dir.join(JSON_STATE_FILE_NAME),
            StorageBackend::Sqlite => self.data_dir.join(SQLITE_FILE_NAME),
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Builds the adapter selected by `config`.
///
/// # Errors
/// - Returns an error when the data directory cannot be created or the
///   SQLite database cannot be opened/migrated.
pub fn open_adapter(config: &StoreConfig) -> Result<Box<dyn PersistenceAdapter>, PersistError> {
    std::fs::create_dir_all(&config.data_dir)?;
    let path = config.state_path();
    Ok(match config.backend {
        StorageBackend::Json => Box::new(JsonFileAdapter::new(path)),
        StorageBackend::Sqlite => Box::new(SqliteAdapter::open(path)?),
    })
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".resume"))
        .unwrap_or_else(|| std::env::temp_dir().join("resume"))
}
