//! Document store error taxonomy.

use crate::model::document::ResumeId;
use crate::model::section::SectionName;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Expected, recoverable outcomes of store operations.
///
/// None of these leave the store in a modified state: an operation that
/// returns an error has not touched the snapshot, the adapter or listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `set_current_resume_id` named a document that does not exist.
    InvalidSelection(ResumeId),
    /// A document-level operation named a document that does not exist.
    UnknownResume(ResumeId),
    /// Item index outside `[0, len)` for the snapshot the caller read.
    IndexOutOfRange {
        section: SectionName,
        index: usize,
        len: usize,
    },
    /// Tagged entry does not belong to the section it was sent to.
    SectionMismatch {
        expected: SectionName,
        actual: SectionName,
    },
    InvalidTemplateId(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSelection(id) => {
                write!(f, "cannot select resume `{id}`: no such document")
            }
            Self::UnknownResume(id) => write!(f, "resume not found: {id}"),
            Self::IndexOutOfRange {
                section,
                index,
                len,
            } => write!(
                f,
                "index {index} is out of range for section `{section}` with {len} entries"
            ),
            Self::SectionMismatch { expected, actual } => write!(
                f,
                "entry of section `{actual}` cannot be written to section `{expected}`"
            ),
            Self::InvalidTemplateId(value) => write!(
                f,
                "invalid template id `{value}`; expected lowercase [a-z0-9._-], max 64 chars"
            ),
        }
    }
}

impl Error for StoreError {}
