//! In-process adapter.
//!
//! Keeps the encoded state in memory. Clones share the same slot, so a
//! caller can keep a handle after giving the adapter to the store.

use super::codec::{decode_state, encode_state};
use super::{PersistError, PersistResult, PersistenceAdapter};
use crate::store::state::StoreState;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MemorySlot {
    encoded: Option<String>,
    fail_saves: bool,
    fail_loads: bool,
    saves: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    slot: Rc<RefCell<MemorySlot>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already-encoded state.
    pub fn with_encoded(encoded: impl Into<String>) -> Self {
        let adapter = Self::default();
        adapter.slot.borrow_mut().encoded = Some(encoded.into());
        adapter
    }

    /// Last successfully saved encoding.
    pub fn encoded(&self) -> Option<String> {
        self.slot.borrow().encoded.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.slot.borrow().saves
    }

    /// Makes subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.slot.borrow_mut().fail_saves = fail;
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.slot.borrow_mut().fail_loads = fail;
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn load(&mut self) -> PersistResult<Option<StoreState>> {
        let slot = self.slot.borrow();
        if slot.fail_loads {
            return Err(PersistError::Rejected("memory load disabled".to_string()));
        }
        slot.encoded.as_deref().map(decode_state).transpose()
    }

    fn save(&mut self, state: &StoreState) -> PersistResult<()> {
        let mut slot = self.slot.borrow_mut();
        if slot.fail_saves {
            return Err(PersistError::Rejected("memory save disabled".to_string()));
        }
        slot.encoded = Some(encode_state(state)?);
        slot.saves += 1;
        Ok(())
    }
}
