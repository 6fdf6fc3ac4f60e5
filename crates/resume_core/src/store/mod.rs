//! Document store and its collaborators.
//!
//! # Responsibility
//! - Own the resume collection and the active selection.
//! - Apply section edits as structurally shared replacements.
//! - Persist after each commit and notify subscribers.
//!
//! # Invariants
//! - All writes go through `DocumentStore`; snapshots are read-only.
//! - Every successful mutation strictly increases the touched document's
//!   `updatedAt` and leaves other documents untouched.

pub mod clock;
pub mod document_store;
pub mod editor;
pub mod error;
pub mod notice;
pub mod state;
pub mod subscription;

pub use clock::{Clock, ManualClock, SystemClock};
pub use document_store::{DocumentStore, StoreOptions};
pub use editor::SectionEditor;
pub use error::{StoreError, StoreResult};
pub use notice::{Notice, NoticeKind};
pub use state::{ResumeMap, StoreState};
pub use subscription::{ChangeKind, StoreChange, StoreListener, SubscriptionId};
