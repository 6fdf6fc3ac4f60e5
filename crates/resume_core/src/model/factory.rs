//! Empty-entry factory.
//!
//! # Responsibility
//! - Produce well-formed empty records for "add item" actions.
//! - Produce a well-formed empty document for seeding and new resumes.
//!
//! # Invariants
//! - Required text fields are `""`; optional fields and collections are
//!   absent (`None`), never empty vectors.
//! - `visible` is left absent so new entries render as shown.
//! - Every call returns a fresh value; nothing is cached or shared.

use super::document::{Basics, DocumentMetadata, ResumeDocument, ResumeId};
use super::entries::{
    Award, Certificate, Education, Interest, Language, Project, Publication, Reference, Skill,
    Volunteer, Work,
};
use super::section::{AnyEntry, SectionEntry, SectionName, Sections};
use std::sync::Arc;

/// Creates an empty entry for section type `E`.
pub fn create_empty<E: SectionEntry>() -> E {
    E::default()
}

impl AnyEntry {
    /// Tag-driven counterpart of [`create_empty`].
    pub fn empty(section: SectionName) -> Self {
        match section {
            SectionName::Work => create_empty::<Work>().into_any(),
            SectionName::Volunteer => create_empty::<Volunteer>().into_any(),
            SectionName::Education => create_empty::<Education>().into_any(),
            SectionName::Awards => create_empty::<Award>().into_any(),
            SectionName::Certificates => create_empty::<Certificate>().into_any(),
            SectionName::Publications => create_empty::<Publication>().into_any(),
            SectionName::Skills => create_empty::<Skill>().into_any(),
            SectionName::Languages => create_empty::<Language>().into_any(),
            SectionName::Interests => create_empty::<Interest>().into_any(),
            SectionName::References => create_empty::<Reference>().into_any(),
            SectionName::Projects => create_empty::<Project>().into_any(),
        }
    }
}

/// Creates a document with empty basics and no entries in any section.
pub fn empty_document(
    id: ResumeId,
    name: impl Into<String>,
    template_id: impl Into<String>,
    now_ms: i64,
) -> ResumeDocument {
    ResumeDocument {
        metadata: DocumentMetadata {
            id,
            name: name.into(),
            created_at: now_ms,
            updated_at: now_ms,
            template_id: template_id.into(),
        },
        basics: Arc::new(Basics::default()),
        sections: Sections::default(),
    }
}
