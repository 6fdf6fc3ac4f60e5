//! Immutable store snapshot.
//!
//! # Responsibility
//! - Hold the document collection, the active selection and page-wrap.
//! - Derive successor snapshots that share every untouched subtree.
//!
//! # Invariants
//! - When `resumes` is non-empty, `current_resume_id` names a present key.
//! - When `resumes` is empty, `current_resume_id` is `None`.
//! - Successor snapshots always carry a fresh `resumes` map; document
//!   values in it are the same `Arc`s unless the document was replaced.

use crate::model::document::{ResumeDocument, ResumeId};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Collection of documents keyed by `metadata.id`.
pub type ResumeMap = BTreeMap<ResumeId, Arc<ResumeDocument>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    resumes: Arc<ResumeMap>,
    current_resume_id: Option<ResumeId>,
    page_wrap: bool,
}

impl StoreState {
    /// Builds a snapshot, repairing a missing or dangling selection.
    ///
    /// A selection that does not name a present document falls back to the
    /// most recently updated one.
    pub fn new(resumes: ResumeMap, current_resume_id: Option<ResumeId>, page_wrap: bool) -> Self {
        let current_resume_id = match current_resume_id {
            Some(id) if resumes.contains_key(id.as_str()) => Some(id),
            _ => most_recent_id(&resumes),
        };
        Self {
            resumes: Arc::new(resumes),
            current_resume_id,
            page_wrap,
        }
    }

    pub fn resumes(&self) -> &Arc<ResumeMap> {
        &self.resumes
    }

    pub fn is_empty(&self) -> bool {
        self.resumes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resumes.len()
    }

    pub fn current_resume_id(&self) -> Option<&str> {
        self.current_resume_id.as_deref()
    }

    pub fn page_wrap(&self) -> bool {
        self.page_wrap
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ResumeDocument>> {
        self.resumes.get(id)
    }

    /// Active document, if any.
    pub fn current(&self) -> Option<&Arc<ResumeDocument>> {
        self.current_resume_id
            .as_deref()
            .and_then(|id| self.resumes.get(id))
    }

    /// Documents ordered by `updated_at DESC, id ASC`.
    pub fn by_recent(&self) -> Vec<Arc<ResumeDocument>> {
        let mut documents: Vec<Arc<ResumeDocument>> = self.resumes.values().cloned().collect();
        documents.sort_by_key(|doc| Reverse(doc.metadata.updated_at));
        documents
    }

    /// Successor with `document` inserted or replaced under its own id.
    pub(crate) fn with_document(&self, document: Arc<ResumeDocument>, select: bool) -> Self {
        let id = document.metadata.id.clone();
        let mut resumes = ResumeMap::clone(&self.resumes);
        resumes.insert(id.clone(), document);
        let current_resume_id = if select || self.current_resume_id.is_none() {
            Some(id)
        } else {
            self.current_resume_id.clone()
        };
        Self {
            resumes: Arc::new(resumes),
            current_resume_id,
            page_wrap: self.page_wrap,
        }
    }

    /// Successor without `id`; a removed selection falls back to the most
    /// recently updated remaining document.
    pub(crate) fn without_document(&self, id: &str) -> Self {
        let mut resumes = ResumeMap::clone(&self.resumes);
        resumes.remove(id);
        let current_resume_id = match self.current_resume_id.as_deref() {
            Some(current) if current != id => Some(current.to_string()),
            _ => most_recent_id(&resumes),
        };
        Self {
            resumes: Arc::new(resumes),
            current_resume_id,
            page_wrap: self.page_wrap,
        }
    }

    /// Successor selecting `id`. Callers check presence first.
    pub(crate) fn with_selection(&self, id: &str) -> Self {
        Self {
            resumes: Arc::new(ResumeMap::clone(&self.resumes)),
            current_resume_id: Some(id.to_string()),
            page_wrap: self.page_wrap,
        }
    }

    pub(crate) fn with_page_wrap(&self, page_wrap: bool) -> Self {
        Self {
            resumes: Arc::new(ResumeMap::clone(&self.resumes)),
            current_resume_id: self.current_resume_id.clone(),
            page_wrap,
        }
    }
}

fn most_recent_id(resumes: &ResumeMap) -> Option<ResumeId> {
    // BTreeMap iterates ids ascending; `max_by_key` keeps the last maximum,
    // so iterate in reverse to prefer the smallest id on equal timestamps.
    resumes
        .values()
        .rev()
        .max_by_key(|doc| doc.metadata.updated_at)
        .map(|doc| doc.metadata.id.clone())
}

#[cfg(test)]
mod tests {
    use super::{ResumeMap, StoreState};
    use crate::model::factory::empty_document;
    use std::sync::Arc;

    fn map_of(docs: &[(&str, i64)]) -> ResumeMap {
        docs.iter()
            .map(|(id, updated)| {
                let mut doc = empty_document(id.to_string(), *id, "classic", 0);
                doc.metadata.updated_at = *updated;
                (id.to_string(), Arc::new(doc))
            })
            .collect()
    }

    #[test]
    fn new_repairs_dangling_selection_with_most_recent() {
        let state = StoreState::new(map_of(&[("a", 10), ("b", 30), ("c", 20)]), Some("z".into()), false);
        assert_eq!(state.current_resume_id(), Some("b"));
    }

    #[test]
    fn most_recent_tie_prefers_smallest_id() {
        let state = StoreState::new(map_of(&[("b", 5), ("a", 5)]), None, false);
        assert_eq!(state.current_resume_id(), Some("a"));
    }

    #[test]
    fn empty_state_has_no_selection() {
        let state = StoreState::new(ResumeMap::new(), Some("a".into()), true);
        assert_eq!(state.current_resume_id(), None);
        assert!(state.current().is_none());
        assert!(state.page_wrap());
    }

    #[test]
    fn by_recent_sorts_descending_then_by_id() {
        let state = StoreState::new(map_of(&[("b", 5), ("a", 5), ("c", 9)]), None, false);
        let ids: Vec<String> = state
            .by_recent()
            .iter()
            .map(|doc| doc.metadata.id.clone())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn without_document_reselects_when_current_removed() {
        let state = StoreState::new(map_of(&[("a", 1), ("b", 2)]), Some("b".into()), false);
        let next = state.without_document("b");
        assert_eq!(next.current_resume_id(), Some("a"));
        assert!(!Arc::ptr_eq(next.resumes(), state.resumes()));
        assert!(Arc::ptr_eq(next.get("a").unwrap(), state.get("a").unwrap()));
    }
}
