//! Resume document aggregate.
//!
//! # Responsibility
//! - Define the unit of persistence and editing (`ResumeDocument`).
//! - Keep document bookkeeping (`DocumentMetadata`) next to the content.
//!
//! # Invariants
//! - `metadata.id` never changes after creation.
//! - `metadata.template_id` is the only place a template choice is stored.
//! - `basics` and every section are independently shared subtrees.

use super::section::{Entries, SectionEntry, Sections};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Opaque document identifier. New ids are uuid v4 strings.
pub type ResumeId = String;

/// Generates a fresh document id.
pub fn new_resume_id() -> ResumeId {
    uuid::Uuid::new_v4().to_string()
}

/// Bookkeeping stamped by the store, never edited by section editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub id: ResumeId,
    /// Display name shown in the document picker.
    #[serde(default)]
    pub name: String,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    /// Unix epoch milliseconds. Strictly increases on every mutation.
    #[serde(default)]
    pub updated_at: i64,
    /// Renderer id chosen for this document.
    #[serde(default)]
    pub template_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// ISO-3166-1 alpha-2, as entered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Social/network profile link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Single-record header of a resume: who this is and how to reach them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Basics {
    pub name: String,
    /// Headline, e.g. "Systems Engineer".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<Profile>>,
}

/// One resume as edited and persisted.
///
/// Sections are flattened into the top level on the wire, next to `basics`
/// and `_metadata`, matching the JSON Resume layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(rename = "_metadata")]
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub basics: Arc<Basics>,
    #[serde(flatten)]
    pub sections: Sections,
}

impl ResumeDocument {
    pub fn id(&self) -> &str {
        self.metadata.id.as_str()
    }

    /// Typed read of one section.
    pub fn entries<E: SectionEntry>(&self) -> &Entries<E> {
        E::entries(&self.sections)
    }

    /// Entries of one section an output should include, in order.
    pub fn visible_entries<E: SectionEntry>(&self) -> impl Iterator<Item = &Arc<E>> + '_ {
        self.entries::<E>().iter().filter(|entry| entry.is_visible())
    }
}
