//! Core domain logic for the resume editor.
//! This crate is the single source of truth for document invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod render;
pub mod store;

pub use config::{open_adapter, ConfigError, StorageBackend, StoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::document::{
    Basics, DocumentMetadata, Location, Profile, ResumeDocument, ResumeId,
};
pub use model::entries::{
    Award, Certificate, Education, Interest, Language, Project, Publication, Reference, Skill,
    Volunteer, Work,
};
pub use model::factory::{create_empty, empty_document};
pub use model::section::{
    AnyEntry, Entries, SectionEntries, SectionEntry, SectionName, Sections, UnknownSection,
};
pub use persist::{
    JsonFileAdapter, MemoryAdapter, PersistError, PersistResult, PersistenceAdapter,
    SqliteAdapter,
};
pub use render::{
    PlainTextTemplate, RenderError, RenderOptions, RenderedDocument, TemplateRegistry,
    TemplateRenderer,
};
pub use store::{
    ChangeKind, DocumentStore, Notice, NoticeKind, SectionEditor, StoreChange, StoreError,
    StoreListener, StoreOptions, StoreResult, StoreState, SubscriptionId,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
