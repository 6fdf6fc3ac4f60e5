//! Document store: the single writer over every resume.
//!
//! # Responsibility
//! - Own the current `StoreState` snapshot and replace it on each mutation.
//! - Funnel every section edit through one generic replace primitive.
//! - Stamp `updatedAt`, persist, and notify subscribers after each commit.
//!
//! # Invariants
//! - A mutation builds a new document and a new `resumes` map, reusing
//!   every untouched subtree (`basics`, other sections, other entries,
//!   other documents) by `Arc`.
//! - A failed operation leaves snapshot, adapter and listeners untouched.
//! - A failed save is reported as a `Notice`; in-memory state stays.
//! - Section arrays are never re-sorted implicitly; appends go last.

use crate::config::{StoreConfig, DEFAULT_SEED_DOCUMENT_NAME, DEFAULT_TEMPLATE_ID};
use crate::model::document::{new_resume_id, Basics, ResumeDocument, ResumeId};
use crate::model::entries::{
    Award, Certificate, Education, Interest, Language, Project, Publication, Reference, Skill,
    Volunteer, Work,
};
use crate::model::factory::empty_document;
use crate::model::section::{AnyEntry, Entries, SectionEntries, SectionEntry, SectionName};
use crate::persist::PersistenceAdapter;
use crate::render::is_valid_template_id;
use crate::store::clock::{next_stamp, Clock, SystemClock};
use crate::store::error::{StoreError, StoreResult};
use crate::store::notice::{Notice, NoticeBoard, NoticeKind};
use crate::store::state::{ResumeMap, StoreState};
use crate::store::subscription::{
    ChangeKind, ListenerRegistry, StoreChange, StoreListener, SubscriptionId,
};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Defaults applied to documents the store creates on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub default_template_id: String,
    pub seed_document_name: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            default_template_id: DEFAULT_TEMPLATE_ID.to_string(),
            seed_document_name: DEFAULT_SEED_DOCUMENT_NAME.to_string(),
        }
    }
}

impl From<&StoreConfig> for StoreOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            default_template_id: config.default_template_id.clone(),
            seed_document_name: config.seed_document_name.clone(),
        }
    }
}

pub struct DocumentStore {
    state: Arc<StoreState>,
    adapter: Box<dyn PersistenceAdapter>,
    clock: Box<dyn Clock>,
    options: StoreOptions,
    /// Returned by `data()` while no document exists.
    placeholder: Arc<ResumeDocument>,
    listeners: ListenerRegistry,
    notices: NoticeBoard,
}

impl DocumentStore {
    /// Loads state from `adapter`, seeding one empty document when nothing
    /// was stored yet.
    pub fn open(adapter: Box<dyn PersistenceAdapter>, options: StoreOptions) -> Self {
        Self::open_with_clock(adapter, options, Box::new(SystemClock))
    }

    /// Same as [`DocumentStore::open`] with an explicit timestamp source.
    ///
    /// # Side effects
    /// - Saves the seeded state when the adapter had nothing stored.
    /// - Records a `LoadFailure` notice when loading fails; the session
    ///   then starts from a seeded in-memory state that is not saved until
    ///   the first mutation.
    pub fn open_with_clock(
        mut adapter: Box<dyn PersistenceAdapter>,
        options: StoreOptions,
        clock: Box<dyn Clock>,
    ) -> Self {
        let started_at = Instant::now();
        let backend = adapter.backend();
        let placeholder = Arc::new(empty_document(
            ResumeId::new(),
            "",
            options.default_template_id.clone(),
            0,
        ));
        let mut notices = NoticeBoard::default();

        let (state, save_seed) = match adapter.load() {
            Ok(Some(state)) => (state, false),
            Ok(None) => (seed_state(&options, clock.as_ref()), true),
            Err(err) => {
                warn!(
                    "event=store_open module=store status=error backend={} error_code=load_failed error={}",
                    backend, err
                );
                notices.push(
                    NoticeKind::LoadFailure,
                    format!("saved resumes could not be loaded: {err}"),
                );
                (seed_state(&options, clock.as_ref()), false)
            }
        };

        let mut store = Self {
            state: Arc::new(state),
            adapter,
            clock,
            options,
            placeholder,
            listeners: ListenerRegistry::default(),
            notices,
        };
        if save_seed {
            store.persist();
        }

        info!(
            "event=store_open module=store status=ok backend={} resumes={} duration_ms={}",
            backend,
            store.state.len(),
            started_at.elapsed().as_millis()
        );
        store
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Current immutable snapshot.
    pub fn snapshot(&self) -> Arc<StoreState> {
        Arc::clone(&self.state)
    }

    /// Active document, or an empty placeholder when no document exists.
    pub fn data(&self) -> Arc<ResumeDocument> {
        self.state
            .current()
            .map_or_else(|| Arc::clone(&self.placeholder), Arc::clone)
    }

    pub fn current_resume_id(&self) -> Option<&str> {
        self.state.current_resume_id()
    }

    pub fn page_wrap(&self) -> bool {
        self.state.page_wrap()
    }

    /// Template of the active document, or the default template.
    pub fn selected_template(&self) -> &str {
        self.state
            .current()
            .map_or(self.options.default_template_id.as_str(), |doc| {
                doc.metadata.template_id.as_str()
            })
    }

    pub fn get(&self, id: &str) -> Option<Arc<ResumeDocument>> {
        self.state.get(id).cloned()
    }

    /// Documents ordered by most recently updated first.
    pub fn list_resumes(&self) -> Vec<Arc<ResumeDocument>> {
        self.state.by_recent()
    }

    /// Typed read of one section of the active document.
    pub fn section<E: SectionEntry>(&self) -> Entries<E> {
        Arc::clone(self.data().entries::<E>())
    }

    /// Tag-driven read of one section of the active document.
    pub fn section_by_name(&self, name: SectionName) -> SectionEntries {
        self.data().sections.get(name)
    }

    // ------------------------------------------------------------------
    // Section mutations
    // ------------------------------------------------------------------

    /// Replaces the whole `E` section of the active document.
    ///
    /// Entries the caller passes through unchanged keep their identity.
    pub fn update_section<E: SectionEntry>(&mut self, entries: Vec<Arc<E>>) -> StoreResult<()> {
        self.replace_entries(ChangeKind::SectionReplaced(E::SECTION), Arc::new(entries))
    }

    /// Replaces exactly the entry at `index` of the `E` section.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`; nothing changes.
    pub fn update_section_item<E: SectionEntry>(
        &mut self,
        index: usize,
        entry: E,
    ) -> StoreResult<()> {
        let mut entries = self.entries_vec::<E>();
        let len = entries.len();
        let slot = entries
            .get_mut(index)
            .ok_or_else(|| out_of_range::<E>(index, len))?;
        *slot = Arc::new(entry);
        self.replace_entries(
            ChangeKind::SectionItemReplaced {
                section: E::SECTION,
                index,
            },
            Arc::new(entries),
        )
    }

    /// Appends `entry` at the end of the `E` section.
    pub fn append_section_item<E: SectionEntry>(&mut self, entry: E) -> StoreResult<()> {
        let mut entries = self.entries_vec::<E>();
        entries.push(Arc::new(entry));
        self.update_section(entries)
    }

    /// Removes the entry at `index` by filtering it out of the section.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`; nothing changes.
    pub fn remove_section_item<E: SectionEntry>(&mut self, index: usize) -> StoreResult<()> {
        let entries = self.entries_vec::<E>();
        if index >= entries.len() {
            return Err(out_of_range::<E>(index, entries.len()));
        }
        let kept = entries
            .into_iter()
            .enumerate()
            .filter(|(position, _)| *position != index)
            .map(|(_, entry)| entry)
            .collect();
        self.update_section(kept)
    }

    /// Moves the entry at `from` so it ends up at `to`.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when either index is `>= len`; nothing changes.
    pub fn move_section_item<E: SectionEntry>(&mut self, from: usize, to: usize) -> StoreResult<()> {
        let mut entries = self.entries_vec::<E>();
        let len = entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(out_of_range::<E>(index, len));
            }
        }
        if from == to {
            return Ok(());
        }
        let entry = entries.remove(from);
        entries.insert(to, entry);
        self.update_section(entries)
    }

    /// Sets the `visible` enrichment flag of one entry.
    pub fn set_item_visible<E: SectionEntry>(
        &mut self,
        index: usize,
        visible: bool,
    ) -> StoreResult<()> {
        let current = self.section::<E>();
        let entry = current
            .get(index)
            .ok_or_else(|| out_of_range::<E>(index, current.len()))?;
        let mut updated = E::clone(entry);
        updated.set_visible(Some(visible));
        self.update_section_item(index, updated)
    }

    /// Tag-driven [`DocumentStore::update_section`]; the variant names the
    /// section.
    pub fn replace_section(&mut self, entries: SectionEntries) -> StoreResult<()> {
        let kind = ChangeKind::SectionReplaced(entries.name());
        match entries {
            SectionEntries::Work(entries) => self.replace_entries(kind, entries),
            SectionEntries::Volunteer(entries) => self.replace_entries(kind, entries),
            SectionEntries::Education(entries) => self.replace_entries(kind, entries),
            SectionEntries::Awards(entries) => self.replace_entries(kind, entries),
            SectionEntries::Certificates(entries) => self.replace_entries(kind, entries),
            SectionEntries::Publications(entries) => self.replace_entries(kind, entries),
            SectionEntries::Skills(entries) => self.replace_entries(kind, entries),
            SectionEntries::Languages(entries) => self.replace_entries(kind, entries),
            SectionEntries::Interests(entries) => self.replace_entries(kind, entries),
            SectionEntries::References(entries) => self.replace_entries(kind, entries),
            SectionEntries::Projects(entries) => self.replace_entries(kind, entries),
        }
    }

    /// Tag-driven [`DocumentStore::update_section_item`].
    ///
    /// # Errors
    /// - `SectionMismatch` when `entry` belongs to a section other than
    ///   `section` (a wiring bug in the caller).
    /// - `IndexOutOfRange` as for the typed form.
    pub fn replace_section_item(
        &mut self,
        section: SectionName,
        index: usize,
        entry: AnyEntry,
    ) -> StoreResult<()> {
        if entry.section() != section {
            return Err(StoreError::SectionMismatch {
                expected: section,
                actual: entry.section(),
            });
        }
        match entry {
            AnyEntry::Work(entry) => self.update_section_item(index, entry),
            AnyEntry::Volunteer(entry) => self.update_section_item(index, entry),
            AnyEntry::Education(entry) => self.update_section_item(index, entry),
            AnyEntry::Awards(entry) => self.update_section_item(index, entry),
            AnyEntry::Certificates(entry) => self.update_section_item(index, entry),
            AnyEntry::Publications(entry) => self.update_section_item(index, entry),
            AnyEntry::Skills(entry) => self.update_section_item(index, entry),
            AnyEntry::Languages(entry) => self.update_section_item(index, entry),
            AnyEntry::Interests(entry) => self.update_section_item(index, entry),
            AnyEntry::References(entry) => self.update_section_item(index, entry),
            AnyEntry::Projects(entry) => self.update_section_item(index, entry),
        }
    }

    /// Tag-driven append.
    pub fn append_any(&mut self, entry: AnyEntry) -> StoreResult<()> {
        match entry {
            AnyEntry::Work(entry) => self.append_section_item(entry),
            AnyEntry::Volunteer(entry) => self.append_section_item(entry),
            AnyEntry::Education(entry) => self.append_section_item(entry),
            AnyEntry::Awards(entry) => self.append_section_item(entry),
            AnyEntry::Certificates(entry) => self.append_section_item(entry),
            AnyEntry::Publications(entry) => self.append_section_item(entry),
            AnyEntry::Skills(entry) => self.append_section_item(entry),
            AnyEntry::Languages(entry) => self.append_section_item(entry),
            AnyEntry::Interests(entry) => self.append_section_item(entry),
            AnyEntry::References(entry) => self.append_section_item(entry),
            AnyEntry::Projects(entry) => self.append_section_item(entry),
        }
    }

    /// Tag-driven remove.
    pub fn remove_item_by_name(&mut self, section: SectionName, index: usize) -> StoreResult<()> {
        match section {
            SectionName::Work => self.remove_section_item::<Work>(index),
            SectionName::Volunteer => self.remove_section_item::<Volunteer>(index),
            SectionName::Education => self.remove_section_item::<Education>(index),
            SectionName::Awards => self.remove_section_item::<Award>(index),
            SectionName::Certificates => self.remove_section_item::<Certificate>(index),
            SectionName::Publications => self.remove_section_item::<Publication>(index),
            SectionName::Skills => self.remove_section_item::<Skill>(index),
            SectionName::Languages => self.remove_section_item::<Language>(index),
            SectionName::Interests => self.remove_section_item::<Interest>(index),
            SectionName::References => self.remove_section_item::<Reference>(index),
            SectionName::Projects => self.remove_section_item::<Project>(index),
        }
    }

    /// Tag-driven move.
    pub fn move_item_by_name(
        &mut self,
        section: SectionName,
        from: usize,
        to: usize,
    ) -> StoreResult<()> {
        match section {
            SectionName::Work => self.move_section_item::<Work>(from, to),
            SectionName::Volunteer => self.move_section_item::<Volunteer>(from, to),
            SectionName::Education => self.move_section_item::<Education>(from, to),
            SectionName::Awards => self.move_section_item::<Award>(from, to),
            SectionName::Certificates => self.move_section_item::<Certificate>(from, to),
            SectionName::Publications => self.move_section_item::<Publication>(from, to),
            SectionName::Skills => self.move_section_item::<Skill>(from, to),
            SectionName::Languages => self.move_section_item::<Language>(from, to),
            SectionName::Interests => self.move_section_item::<Interest>(from, to),
            SectionName::References => self.move_section_item::<Reference>(from, to),
            SectionName::Projects => self.move_section_item::<Project>(from, to),
        }
    }

    /// Tag-driven visibility toggle.
    pub fn set_visible_by_name(
        &mut self,
        section: SectionName,
        index: usize,
        visible: bool,
    ) -> StoreResult<()> {
        match section {
            SectionName::Work => self.set_item_visible::<Work>(index, visible),
            SectionName::Volunteer => self.set_item_visible::<Volunteer>(index, visible),
            SectionName::Education => self.set_item_visible::<Education>(index, visible),
            SectionName::Awards => self.set_item_visible::<Award>(index, visible),
            SectionName::Certificates => self.set_item_visible::<Certificate>(index, visible),
            SectionName::Publications => self.set_item_visible::<Publication>(index, visible),
            SectionName::Skills => self.set_item_visible::<Skill>(index, visible),
            SectionName::Languages => self.set_item_visible::<Language>(index, visible),
            SectionName::Interests => self.set_item_visible::<Interest>(index, visible),
            SectionName::References => self.set_item_visible::<Reference>(index, visible),
            SectionName::Projects => self.set_item_visible::<Project>(index, visible),
        }
    }

    // Named wrappers kept for section editors written against per-section
    // calls. Each one is `update_section` and nothing else.

    pub fn update_work(&mut self, entries: Vec<Arc<Work>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_volunteer(&mut self, entries: Vec<Arc<Volunteer>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_education(&mut self, entries: Vec<Arc<Education>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_awards(&mut self, entries: Vec<Arc<Award>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_certificates(&mut self, entries: Vec<Arc<Certificate>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_publications(&mut self, entries: Vec<Arc<Publication>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_skills(&mut self, entries: Vec<Arc<Skill>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_languages(&mut self, entries: Vec<Arc<Language>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_interests(&mut self, entries: Vec<Arc<Interest>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_references(&mut self, entries: Vec<Arc<Reference>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    pub fn update_projects(&mut self, entries: Vec<Arc<Project>>) -> StoreResult<()> {
        self.update_section(entries)
    }

    /// Replaces `basics` of the active document.
    pub fn update_basics(&mut self, basics: Basics) -> StoreResult<()> {
        self.mutate_active(ChangeKind::BasicsUpdated, |document| {
            let mut next = document.clone();
            next.basics = Arc::new(basics);
            Ok(next)
        })
    }

    // ------------------------------------------------------------------
    // Selection & preferences
    // ------------------------------------------------------------------

    /// Makes `id` the active document.
    ///
    /// # Errors
    /// - `InvalidSelection` when `id` is not a stored document; the
    ///   previous selection is kept.
    pub fn set_current_resume_id(&mut self, id: &str) -> StoreResult<()> {
        if self.state.get(id).is_none() {
            warn!(
                "event=store_select module=store status=error error_code=invalid_selection id={}",
                id
            );
            return Err(StoreError::InvalidSelection(id.to_string()));
        }
        if self.state.current_resume_id() == Some(id) {
            return Ok(());
        }
        let next = self.state.with_selection(id);
        self.commit(ChangeKind::SelectionChanged, next);
        Ok(())
    }

    /// Stores `template_id` on the active document's metadata.
    ///
    /// Selecting the template that is already active changes nothing.
    pub fn set_selected_template(&mut self, template_id: &str) -> StoreResult<()> {
        let template_id = template_id.trim();
        if !is_valid_template_id(template_id) {
            return Err(StoreError::InvalidTemplateId(template_id.to_string()));
        }
        if self
            .state
            .current()
            .is_some_and(|doc| doc.metadata.template_id == template_id)
        {
            return Ok(());
        }
        self.mutate_active(ChangeKind::TemplateChanged, |document| {
            let mut next = document.clone();
            next.metadata.template_id = template_id.to_string();
            Ok(next)
        })
    }

    /// Sets the process-wide page-wrap preference. Documents are untouched.
    pub fn set_page_wrap(&mut self, enabled: bool) {
        if self.state.page_wrap() == enabled {
            return;
        }
        let next = self.state.with_page_wrap(enabled);
        self.commit(ChangeKind::PageWrapChanged, next);
    }

    // ------------------------------------------------------------------
    // Document lifecycle
    // ------------------------------------------------------------------

    /// Creates an empty document and makes it active.
    pub fn create_resume(&mut self, name: &str) -> ResumeId {
        let document = self.new_document(name);
        let id = document.metadata.id.clone();
        let next = self.state.with_document(Arc::new(document), true);
        self.commit(ChangeKind::ResumeCreated(id.clone()), next);
        id
    }

    /// Copies document `id` under a fresh id and makes the copy active.
    ///
    /// The copy shares `basics` and every section with its source until
    /// either side is edited.
    pub fn duplicate_resume(&mut self, id: &str) -> StoreResult<ResumeId> {
        let source = self
            .state
            .get(id)
            .ok_or_else(|| StoreError::UnknownResume(id.to_string()))?;
        let now = self.clock.now_ms();
        let mut copy = ResumeDocument::clone(source);
        copy.metadata.id = new_resume_id();
        copy.metadata.name = format!("{} (copy)", source.metadata.name);
        copy.metadata.created_at = now;
        copy.metadata.updated_at = now;

        let copy_id = copy.metadata.id.clone();
        let next = self.state.with_document(Arc::new(copy), true);
        self.commit(ChangeKind::ResumeCreated(copy_id.clone()), next);
        Ok(copy_id)
    }

    /// Adds an externally built document under a fresh id and selects it.
    ///
    /// Incoming `id`, `createdAt` and `updatedAt` are replaced; content and
    /// template choice are kept (an invalid template falls back to the
    /// default).
    pub fn import_document(&mut self, mut document: ResumeDocument) -> ResumeId {
        let now = self.clock.now_ms();
        document.metadata.id = new_resume_id();
        document.metadata.created_at = now;
        document.metadata.updated_at = now;
        if !is_valid_template_id(&document.metadata.template_id) {
            document.metadata.template_id = self.options.default_template_id.clone();
        }

        let id = document.metadata.id.clone();
        let next = self.state.with_document(Arc::new(document), true);
        self.commit(ChangeKind::ResumeCreated(id.clone()), next);
        id
    }

    pub fn rename_resume(&mut self, id: &str, name: &str) -> StoreResult<()> {
        let document = self
            .state
            .get(id)
            .ok_or_else(|| StoreError::UnknownResume(id.to_string()))?;
        let mut next = ResumeDocument::clone(document);
        next.metadata.name = name.trim().to_string();
        next.metadata.updated_at = next_stamp(self.clock.as_ref(), document.metadata.updated_at);

        let next_state = self.state.with_document(Arc::new(next), false);
        self.commit(ChangeKind::ResumeRenamed(id.to_string()), next_state);
        Ok(())
    }

    /// Deletes document `id`. Deleting the active document selects the most
    /// recently updated remaining one.
    pub fn delete_resume(&mut self, id: &str) -> StoreResult<()> {
        if self.state.get(id).is_none() {
            return Err(StoreError::UnknownResume(id.to_string()));
        }
        let next = self.state.without_document(id);
        self.commit(ChangeKind::ResumeDeleted(id.to_string()), next);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Subscriptions & notices
    // ------------------------------------------------------------------

    pub fn subscribe(&mut self, listener: impl StoreListener + 'static) -> SubscriptionId {
        self.listeners.add(Box::new(listener))
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Pending, undismissed notices, oldest first.
    pub fn notices(&self) -> &[Notice] {
        self.notices.pending()
    }

    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        self.notices.dismiss(id)
    }

    /// Saves the current state again, e.g. after a failed save was fixed.
    ///
    /// Returns whether the save succeeded; a failure is also recorded as a
    /// notice.
    pub fn flush(&mut self) -> bool {
        self.persist()
    }

    // ------------------------------------------------------------------
    // Engine
    // ------------------------------------------------------------------

    fn entries_vec<E: SectionEntry>(&self) -> Vec<Arc<E>> {
        Vec::clone(self.data().entries::<E>())
    }

    /// The single section write path.
    fn replace_entries<E: SectionEntry>(
        &mut self,
        kind: ChangeKind,
        entries: Entries<E>,
    ) -> StoreResult<()> {
        self.mutate_active(kind, move |document| {
            let mut next = document.clone();
            *E::entries_mut(&mut next.sections) = entries;
            Ok(next)
        })
    }

    /// Applies `edit` to the active document and commits the result.
    ///
    /// With no active document, `edit` runs against a fresh document which
    /// is only added to the collection if `edit` succeeds.
    fn mutate_active(
        &mut self,
        kind: ChangeKind,
        edit: impl FnOnce(&ResumeDocument) -> StoreResult<ResumeDocument>,
    ) -> StoreResult<()> {
        let (base, created) = match self.state.current() {
            Some(document) => (Arc::clone(document), false),
            None => {
                let name = self.options.seed_document_name.clone();
                (Arc::new(self.new_document(&name)), true)
            }
        };

        let mut next = edit(&base)?;
        next.metadata.id = base.metadata.id.clone();
        next.metadata.updated_at = next_stamp(self.clock.as_ref(), base.metadata.updated_at);

        if created {
            info!(
                "event=store_materialize module=store status=ok id={}",
                next.metadata.id
            );
        }
        let next_state = self.state.with_document(Arc::new(next), created);
        self.commit(kind, next_state);
        Ok(())
    }

    fn new_document(&self, name: &str) -> ResumeDocument {
        let name = name.trim();
        let name = if name.is_empty() {
            self.options.seed_document_name.as_str()
        } else {
            name
        };
        empty_document(
            new_resume_id(),
            name,
            self.options.default_template_id.clone(),
            self.clock.now_ms(),
        )
    }

    fn commit(&mut self, kind: ChangeKind, next: StoreState) {
        let previous = std::mem::replace(&mut self.state, Arc::new(next));
        debug!(
            "event=store_commit module=store status=ok change={} resumes={} current={}",
            kind.label(),
            self.state.len(),
            self.state.current_resume_id().unwrap_or("-")
        );
        self.persist();

        let change = StoreChange {
            kind,
            previous,
            current: Arc::clone(&self.state),
        };
        self.listeners.notify(&change);
    }

    fn persist(&mut self) -> bool {
        let started_at = Instant::now();
        match self.adapter.save(&self.state) {
            Ok(()) => {
                debug!(
                    "event=store_persist module=store status=ok backend={} duration_ms={}",
                    self.adapter.backend(),
                    started_at.elapsed().as_millis()
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=store_persist module=store status=error backend={} duration_ms={} error_code=save_failed error={}",
                    self.adapter.backend(),
                    started_at.elapsed().as_millis(),
                    err
                );
                self.notices.push(
                    NoticeKind::PersistenceFailure,
                    format!("changes could not be saved: {err}"),
                );
                false
            }
        }
    }
}

fn seed_state(options: &StoreOptions, clock: &dyn Clock) -> StoreState {
    let document = empty_document(
        new_resume_id(),
        options.seed_document_name.clone(),
        options.default_template_id.clone(),
        clock.now_ms(),
    );
    let id = document.metadata.id.clone();
    let mut resumes = ResumeMap::new();
    resumes.insert(id.clone(), Arc::new(document));
    StoreState::new(resumes, Some(id), false)
}

fn out_of_range<E: SectionEntry>(index: usize, len: usize) -> StoreError {
    StoreError::IndexOutOfRange {
        section: E::SECTION,
        index,
        len,
    }
}
