//! Non-fatal, dismissible reports surfaced to the user.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Saving failed; in-memory state is still authoritative.
    PersistenceFailure,
    /// Loading failed at startup; the session started from a fresh state.
    LoadFailure,
}

impl Display for NoticeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersistenceFailure => f.write_str("persistence_failure"),
            Self::LoadFailure => f.write_str("load_failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub(crate) struct NoticeBoard {
    next_id: u64,
    pending: Vec<Notice>,
}

impl NoticeBoard {
    pub(crate) fn push(&mut self, kind: NoticeKind, message: String) -> u64 {
        self.next_id += 1;
        self.pending.push(Notice {
            id: self.next_id,
            kind,
            message,
        });
        self.next_id
    }

    pub(crate) fn pending(&self) -> &[Notice] {
        &self.pending
    }

    pub(crate) fn dismiss(&mut self, id: u64) -> bool {
        let before = self.pending.len();
        self.pending.retain(|notice| notice.id != id);
        self.pending.len() != before
    }
}
