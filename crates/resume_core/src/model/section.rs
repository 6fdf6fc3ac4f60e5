//! Closed section enumeration and tagged section storage.
//!
//! # Responsibility
//! - Name every section a document carries (`SectionName`).
//! - Store each section as a shared, ordered sequence of shared entries.
//! - Bridge typed access (`SectionEntry`) and tag-driven access
//!   (`SectionEntries`, `AnyEntry`) over the same storage.
//!
//! # Invariants
//! - The set of sections is closed; unknown section keys are rejected at
//!   parse time, never mapped to a fallback section.
//! - Entry order is display order. Nothing in this module re-sorts entries.
//! - Section arrays and entries are immutable behind `Arc`; replacing a
//!   section swaps the pointer, it never mutates a shared vector in place.

use super::entries::{
    Award, Certificate, Education, Interest, Language, Project, Publication, Reference, Skill,
    Volunteer, Work,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Shared ordered sequence of shared entries for one section.
pub type Entries<E> = Arc<Vec<Arc<E>>>;

/// Tag for every section a resume document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionName {
    Work,
    Volunteer,
    Education,
    Awards,
    Certificates,
    Publications,
    Skills,
    Languages,
    Interests,
    References,
    Projects,
}

impl SectionName {
    /// Every section in canonical display order.
    pub const ALL: [SectionName; 11] = [
        Self::Work,
        Self::Volunteer,
        Self::Education,
        Self::Awards,
        Self::Certificates,
        Self::Publications,
        Self::Skills,
        Self::Languages,
        Self::Interests,
        Self::References,
        Self::Projects,
    ];

    /// Stable wire key, identical to the document field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Volunteer => "volunteer",
            Self::Education => "education",
            Self::Awards => "awards",
            Self::Certificates => "certificates",
            Self::Publications => "publications",
            Self::Skills => "skills",
            Self::Languages => "languages",
            Self::Interests => "interests",
            Self::References => "references",
            Self::Projects => "projects",
        }
    }
}

impl Display for SectionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a section key is not part of the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl Display for UnknownSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown section `{}`", self.0)
    }
}

impl Error for UnknownSection {}

impl FromStr for SectionName {
    type Err = UnknownSection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == normalized)
            .ok_or_else(|| UnknownSection(value.trim().to_string()))
    }
}

/// Typed view of one section's entry record.
///
/// Implemented once per entry type; the associated `SECTION` tag ties the
/// type to exactly one slot in [`Sections`], so typed mutations can never
/// address a different section than the one their entry type belongs to.
pub trait SectionEntry:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const SECTION: SectionName;

    /// Raw enrichment flag. `None` means the editor never touched it.
    fn visible(&self) -> Option<bool>;

    fn set_visible(&mut self, visible: Option<bool>);

    /// Absent visibility is "shown"; only an explicit `false` hides.
    fn is_visible(&self) -> bool {
        self.visible() != Some(false)
    }

    fn entries(sections: &Sections) -> &Entries<Self>;

    fn entries_mut(sections: &mut Sections) -> &mut Entries<Self>;

    fn into_any(self) -> AnyEntry;

    /// Returns the entry back unchanged when it belongs to another section.
    fn from_any(entry: AnyEntry) -> Result<Self, AnyEntry>;

    fn wrap_entries(entries: Entries<Self>) -> SectionEntries;

    fn from_entries(entries: SectionEntries) -> Result<Entries<Self>, SectionEntries>;
}

/// All section arrays of one document.
///
/// Every field is an independent `Arc`, so a mutation of one section leaves
/// every other field pointer-equal to the previous snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sections {
    pub work: Entries<Work>,
    pub volunteer: Entries<Volunteer>,
    pub education: Entries<Education>,
    pub awards: Entries<Award>,
    pub certificates: Entries<Certificate>,
    pub publications: Entries<Publication>,
    pub skills: Entries<Skill>,
    pub languages: Entries<Language>,
    pub interests: Entries<Interest>,
    pub references: Entries<Reference>,
    pub projects: Entries<Project>,
}

impl Sections {
    /// Returns a tag-driven handle for one section, sharing its storage.
    pub fn get(&self, name: SectionName) -> SectionEntries {
        match name {
            SectionName::Work => SectionEntries::Work(Arc::clone(&self.work)),
            SectionName::Volunteer => SectionEntries::Volunteer(Arc::clone(&self.volunteer)),
            SectionName::Education => SectionEntries::Education(Arc::clone(&self.education)),
            SectionName::Awards => SectionEntries::Awards(Arc::clone(&self.awards)),
            SectionName::Certificates => {
                SectionEntries::Certificates(Arc::clone(&self.certificates))
            }
            SectionName::Publications => {
                SectionEntries::Publications(Arc::clone(&self.publications))
            }
            SectionName::Skills => SectionEntries::Skills(Arc::clone(&self.skills)),
            SectionName::Languages => SectionEntries::Languages(Arc::clone(&self.languages)),
            SectionName::Interests => SectionEntries::Interests(Arc::clone(&self.interests)),
            SectionName::References => SectionEntries::References(Arc::clone(&self.references)),
            SectionName::Projects => SectionEntries::Projects(Arc::clone(&self.projects)),
        }
    }

    pub fn len(&self, name: SectionName) -> usize {
        self.get(name).len()
    }
}

/// Tagged-variant section array. The variant is the section key.
///
/// Serializes as the bare array, like the section field on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionEntries {
    Work(Entries<Work>),
    Volunteer(Entries<Volunteer>),
    Education(Entries<Education>),
    Awards(Entries<Award>),
    Certificates(Entries<Certificate>),
    Publications(Entries<Publication>),
    Skills(Entries<Skill>),
    Languages(Entries<Language>),
    Interests(Entries<Interest>),
    References(Entries<Reference>),
    Projects(Entries<Project>),
}

impl SectionEntries {
    pub fn name(&self) -> SectionName {
        match self {
            Self::Work(_) => SectionName::Work,
            Self::Volunteer(_) => SectionName::Volunteer,
            Self::Education(_) => SectionName::Education,
            Self::Awards(_) => SectionName::Awards,
            Self::Certificates(_) => SectionName::Certificates,
            Self::Publications(_) => SectionName::Publications,
            Self::Skills(_) => SectionName::Skills,
            Self::Languages(_) => SectionName::Languages,
            Self::Interests(_) => SectionName::Interests,
            Self::References(_) => SectionName::References,
            Self::Projects(_) => SectionName::Projects,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Work(entries) => entries.len(),
            Self::Volunteer(entries) => entries.len(),
            Self::Education(entries) => entries.len(),
            Self::Awards(entries) => entries.len(),
            Self::Certificates(entries) => entries.len(),
            Self::Publications(entries) => entries.len(),
            Self::Skills(entries) => entries.len(),
            Self::Languages(entries) => entries.len(),
            Self::Interests(entries) => entries.len(),
            Self::References(entries) => entries.len(),
            Self::Projects(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visibility flags in entry order.
    pub fn visibility(&self) -> Vec<bool> {
        fn flags<E: SectionEntry>(entries: &Entries<E>) -> Vec<bool> {
            entries.iter().map(|entry| entry.is_visible()).collect()
        }
        match self {
            Self::Work(entries) => flags(entries),
            Self::Volunteer(entries) => flags(entries),
            Self::Education(entries) => flags(entries),
            Self::Awards(entries) => flags(entries),
            Self::Certificates(entries) => flags(entries),
            Self::Publications(entries) => flags(entries),
            Self::Skills(entries) => flags(entries),
            Self::Languages(entries) => flags(entries),
            Self::Interests(entries) => flags(entries),
            Self::References(entries) => flags(entries),
            Self::Projects(entries) => flags(entries),
        }
    }
}

/// One entry of any section, tagged by its section.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyEntry {
    Work(Work),
    Volunteer(Volunteer),
    Education(Education),
    Awards(Award),
    Certificates(Certificate),
    Publications(Publication),
    Skills(Skill),
    Languages(Language),
    Interests(Interest),
    References(Reference),
    Projects(Project),
}

impl AnyEntry {
    pub fn section(&self) -> SectionName {
        match self {
            Self::Work(_) => SectionName::Work,
            Self::Volunteer(_) => SectionName::Volunteer,
            Self::Education(_) => SectionName::Education,
            Self::Awards(_) => SectionName::Awards,
            Self::Certificates(_) => SectionName::Certificates,
            Self::Publications(_) => SectionName::Publications,
            Self::Skills(_) => SectionName::Skills,
            Self::Languages(_) => SectionName::Languages,
            Self::Interests(_) => SectionName::Interests,
            Self::References(_) => SectionName::References,
            Self::Projects(_) => SectionName::Projects,
        }
    }

    /// Serializes the inner record without the section tag.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::Work(entry) => serde_json::to_value(entry),
            Self::Volunteer(entry) => serde_json::to_value(entry),
            Self::Education(entry) => serde_json::to_value(entry),
            Self::Awards(entry) => serde_json::to_value(entry),
            Self::Certificates(entry) => serde_json::to_value(entry),
            Self::Publications(entry) => serde_json::to_value(entry),
            Self::Skills(entry) => serde_json::to_value(entry),
            Self::Languages(entry) => serde_json::to_value(entry),
            Self::Interests(entry) => serde_json::to_value(entry),
            Self::References(entry) => serde_json::to_value(entry),
            Self::Projects(entry) => serde_json::to_value(entry),
        }
    }

    /// Parses a bare record as an entry of `section`.
    pub fn from_json(section: SectionName, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match section {
            SectionName::Work => Self::Work(serde_json::from_value(value)?),
            SectionName::Volunteer => Self::Volunteer(serde_json::from_value(value)?),
            SectionName::Education => Self::Education(serde_json::from_value(value)?),
            SectionName::Awards => Self::Awards(serde_json::from_value(value)?),
            SectionName::Certificates => Self::Certificates(serde_json::from_value(value)?),
            SectionName::Publications => Self::Publications(serde_json::from_value(value)?),
            SectionName::Skills => Self::Skills(serde_json::from_value(value)?),
            SectionName::Languages => Self::Languages(serde_json::from_value(value)?),
            SectionName::Interests => Self::Interests(serde_json::from_value(value)?),
            SectionName::References => Self::References(serde_json::from_value(value)?),
            SectionName::Projects => Self::Projects(serde_json::from_value(value)?),
        })
    }
}

macro_rules! impl_section_entry {
    ($entry:ty, $variant:ident, $field:ident) => {
        impl SectionEntry for $entry {
            const SECTION: SectionName = SectionName::$variant;

            fn visible(&self) -> Option<bool> {
                self.visible
            }

            fn set_visible(&mut self, visible: Option<bool>) {
                self.visible = visible;
            }

            fn entries(sections: &Sections) -> &Entries<Self> {
                &sections.$field
            }

            fn entries_mut(sections: &mut Sections) -> &mut Entries<Self> {
                &mut sections.$field
            }

            fn into_any(self) -> AnyEntry {
                AnyEntry::$variant(self)
            }

            fn from_any(entry: AnyEntry) -> Result<Self, AnyEntry> {
                match entry {
                    AnyEntry::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }

            fn wrap_entries(entries: Entries<Self>) -> SectionEntries {
                SectionEntries::$variant(entries)
            }

            fn from_entries(entries: SectionEntries) -> Result<Entries<Self>, SectionEntries> {
                match entries {
                    SectionEntries::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

impl_section_entry!(Work, Work, work);
impl_section_entry!(Volunteer, Volunteer, volunteer);
impl_section_entry!(Education, Education, education);
impl_section_entry!(Award, Awards, awards);
impl_section_entry!(Certificate, Certificates, certificates);
impl_section_entry!(Publication, Publications, publications);
impl_section_entry!(Skill, Skills, skills);
impl_section_entry!(Language, Languages, languages);
impl_section_entry!(Interest, Interests, interests);
impl_section_entry!(Reference, References, references);
impl_section_entry!(Project, Projects, projects);

#[cfg(test)]
mod tests {
    use super::{SectionEntry, SectionName, Sections};
    use crate::model::entries::{Award, Education};
    use std::sync::Arc;

    #[test]
    fn section_name_parses_case_insensitively() {
        assert_eq!(" Awards ".parse::<SectionName>().unwrap(), SectionName::Awards);
        let err = "hobbies".parse::<SectionName>().unwrap_err();
        assert_eq!(err.0, "hobbies");
    }

    #[test]
    fn section_name_wire_key_matches_field_name() {
        let value = serde_json::to_value(Sections::default()).unwrap();
        for name in SectionName::ALL {
            assert!(value.get(name.as_str()).is_some(), "missing {name}");
        }
    }

    #[test]
    fn get_shares_storage_with_typed_slot() {
        let mut sections = Sections::default();
        sections.education = Arc::new(vec![Arc::new(Education::default())]);
        let handle = sections.get(SectionName::Education);
        let typed = Education::from_entries(handle).unwrap();
        assert!(Arc::ptr_eq(&typed, &sections.education));
    }

    #[test]
    fn from_any_rejects_other_section() {
        let any = Award::default().into_any();
        assert!(Education::from_any(any).is_err());
    }
}
