//! Change notification for store subscribers.
//!
//! # Responsibility
//! - Register/unregister listeners and call them after each commit.
//! - Hand listeners both snapshots so they can skip unchanged subtrees by
//!   `Arc::ptr_eq`.
//!
//! # Invariants
//! - Listeners run synchronously, in registration order, after the new
//!   snapshot is installed and persisted.
//! - Listeners only ever see immutable snapshots.

use crate::model::document::ResumeId;
use crate::model::section::SectionName;
use crate::store::state::StoreState;
use std::sync::Arc;

/// What a committed change did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    SectionReplaced(SectionName),
    SectionItemReplaced { section: SectionName, index: usize },
    BasicsUpdated,
    TemplateChanged,
    PageWrapChanged,
    SelectionChanged,
    ResumeCreated(ResumeId),
    ResumeRenamed(ResumeId),
    ResumeDeleted(ResumeId),
}

impl ChangeKind {
    /// Stable short label for log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SectionReplaced(_) => "section_replaced",
            Self::SectionItemReplaced { .. } => "section_item_replaced",
            Self::BasicsUpdated => "basics_updated",
            Self::TemplateChanged => "template_changed",
            Self::PageWrapChanged => "page_wrap_changed",
            Self::SelectionChanged => "selection_changed",
            Self::ResumeCreated(_) => "resume_created",
            Self::ResumeRenamed(_) => "resume_renamed",
            Self::ResumeDeleted(_) => "resume_deleted",
        }
    }
}

/// One committed change, with the snapshots on either side of it.
#[derive(Debug, Clone)]
pub struct StoreChange {
    pub kind: ChangeKind,
    pub previous: Arc<StoreState>,
    pub current: Arc<StoreState>,
}

/// Receives store changes.
pub trait StoreListener {
    fn on_change(&mut self, change: &StoreChange);
}

impl<F> StoreListener for F
where
    F: FnMut(&StoreChange),
{
    fn on_change(&mut self, change: &StoreChange) {
        self(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn StoreListener>)>,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, listener: Box<dyn StoreListener>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    /// Returns `false` when `id` was not registered.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn notify(&mut self, change: &StoreChange) {
        for (_, listener) in &mut self.listeners {
            listener.on_change(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeKind, ListenerRegistry, StoreChange};
    use crate::store::state::StoreState;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn change() -> StoreChange {
        let state = Arc::new(StoreState::default());
        StoreChange {
            kind: ChangeKind::PageWrapChanged,
            previous: Arc::clone(&state),
            current: state,
        }
    }

    #[test]
    fn notify_calls_listeners_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::default();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            registry.add(Box::new(move |_: &StoreChange| seen.borrow_mut().push(tag)));
        }

        registry.notify(&change());
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut registry = ListenerRegistry::default();
        let counter = Rc::clone(&calls);
        let id = registry.add(Box::new(move |_: &StoreChange| *counter.borrow_mut() += 1));

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        registry.notify(&change());
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(registry.len(), 0);
    }
}
