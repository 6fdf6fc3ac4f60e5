//! Section editor binding.
//!
//! A `SectionEditor<E>` can only read and write the section `E` belongs
//! to; the section is fixed by the entry type, not by a runtime key.

use crate::model::document::ResumeDocument;
use crate::model::factory::create_empty;
use crate::model::section::{Entries, SectionEntry, SectionName};
use crate::store::document_store::DocumentStore;
use crate::store::error::StoreResult;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct SectionEditor<'s, E: SectionEntry> {
    store: &'s mut DocumentStore,
    _section: PhantomData<E>,
}

impl DocumentStore {
    /// Binds an editor to the section of `E` in the active document.
    pub fn editor<E: SectionEntry>(&mut self) -> SectionEditor<'_, E> {
        SectionEditor {
            store: self,
            _section: PhantomData,
        }
    }
}

impl<E: SectionEntry> SectionEditor<'_, E> {
    pub fn section(&self) -> SectionName {
        E::SECTION
    }

    /// Whole active document, for editors that show context from it.
    pub fn data(&self) -> Arc<ResumeDocument> {
        self.store.data()
    }

    pub fn entries(&self) -> Entries<E> {
        self.store.section::<E>()
    }

    pub fn on_update(&mut self, entries: Vec<Arc<E>>) -> StoreResult<()> {
        self.store.update_section(entries)
    }

    pub fn on_update_item(&mut self, index: usize, entry: E) -> StoreResult<()> {
        self.store.update_section_item(index, entry)
    }

    pub fn on_remove(&mut self, index: usize) -> StoreResult<()> {
        self.store.remove_section_item::<E>(index)
    }

    /// Appends a fresh empty entry and returns its index.
    pub fn on_add(&mut self) -> StoreResult<usize> {
        self.store.append_section_item(create_empty::<E>())?;
        Ok(self.store.section::<E>().len() - 1)
    }

    pub fn on_move(&mut self, from: usize, to: usize) -> StoreResult<()> {
        self.store.move_section_item::<E>(from, to)
    }

    pub fn on_set_visible(&mut self, index: usize, visible: bool) -> StoreResult<()> {
        self.store.set_item_visible::<E>(index, visible)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::entries::{Education, Skill};
    use crate::model::section::SectionName;
    use crate::persist::MemoryAdapter;
    use crate::store::document_store::{DocumentStore, StoreOptions};

    #[test]
    fn editor_writes_only_its_own_section() {
        let mut store = DocumentStore::open(Box::new(MemoryAdapter::new()), StoreOptions::default());
        let before = store.data();

        let mut editor = store.editor::<Skill>();
        assert_eq!(editor.section(), SectionName::Skills);
        let index = editor.on_add().unwrap();
        assert_eq!(index, 0);
        editor
            .on_update_item(
                index,
                Skill {
                    name: "Rust".into(),
                    ..Skill::default()
                },
            )
            .unwrap();
        assert_eq!(editor.entries()[0].name, "Rust");

        let after = store.data();
        assert_eq!(after.sections.skills.len(), 1);
        assert!(std::sync::Arc::ptr_eq(
            &before.sections.education,
            &after.sections.education
        ));
        assert!(std::sync::Arc::ptr_eq(&before.basics, &after.basics));
    }

    #[test]
    fn editor_on_move_reorders_entries() {
        let mut store = DocumentStore::open(Box::new(MemoryAdapter::new()), StoreOptions::default());
        let mut editor = store.editor::<Education>();
        for institution in ["A", "B", "C"] {
            let index = editor.on_add().unwrap();
            editor
                .on_update_item(
                    index,
                    Education {
                        institution: institution.into(),
                        ..Education::default()
                    },
                )
                .unwrap();
        }

        editor.on_move(0, 2).unwrap();
        let order: Vec<String> = editor
            .entries()
            .iter()
            .map(|entry| entry.institution.clone())
            .collect();
        assert_eq!(order, vec!["B", "C", "A"]);
        assert!(editor.on_move(0, 3).is_err());
    }
}
