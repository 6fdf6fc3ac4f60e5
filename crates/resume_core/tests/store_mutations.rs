use resume_core::store::ManualClock;
use resume_core::{
    create_empty, AnyEntry, Award, DocumentStore, Education, MemoryAdapter, SectionEntries,
    SectionName, Skill, StoreError, StoreOptions, Work,
};
use std::sync::Arc;

fn open_store() -> (DocumentStore, ManualClock) {
    let clock = ManualClock::new(1_000);
    let store = DocumentStore::open_with_clock(
        Box::new(MemoryAdapter::new()),
        StoreOptions::default(),
        Box::new(clock.clone()),
    );
    (store, clock)
}

fn award(title: &str) -> Award {
    Award {
        title: title.to_string(),
        ..Award::default()
    }
}

fn education(institution: &str) -> Education {
    Education {
        institution: institution.to_string(),
        ..Education::default()
    }
}

#[test]
fn education_entry_is_added_edited_and_removed() {
    let (mut store, _) = open_store();
    assert_eq!(store.list_resumes().len(), 1);
    assert!(store.data().sections.education.is_empty());

    store
        .append_section_item(create_empty::<Education>())
        .unwrap();
    assert_eq!(store.data().sections.education[0].institution, "");

    let mut entry = Education::clone(&store.data().sections.education[0]);
    entry.institution = "MIT".to_string();
    store.update_section_item(0, entry).unwrap();

    let data = store.data();
    assert_eq!(data.sections.education.len(), 1);
    assert_eq!(data.sections.education[0].institution, "MIT");

    store.remove_section_item::<Education>(0).unwrap();
    assert_eq!(store.data().sections.education.len(), 0);
}

#[test]
fn item_update_shares_untouched_sections_and_entries() {
    let (mut store, _) = open_store();
    store.append_section_item(award("First")).unwrap();
    store.append_section_item(award("Second")).unwrap();
    store.append_section_item(education("MIT")).unwrap();
    let before = store.data();

    store.update_section_item(1, award("Second, revised")).unwrap();
    let after = store.data();

    assert!(!Arc::ptr_eq(&before, &after));
    assert!(!Arc::ptr_eq(&before.sections.awards, &after.sections.awards));
    assert!(Arc::ptr_eq(
        &before.sections.education,
        &after.sections.education
    ));
    assert!(Arc::ptr_eq(&before.sections.work, &after.sections.work));
    assert!(Arc::ptr_eq(&before.basics, &after.basics));
    assert!(Arc::ptr_eq(
        &before.sections.awards[0],
        &after.sections.awards[0]
    ));
    assert_eq!(after.sections.awards[1].title, "Second, revised");
}

#[test]
fn out_of_range_index_is_rejected_without_changing_state() {
    let (mut store, _) = open_store();
    store.append_section_item(award("Only")).unwrap();
    let snapshot = store.snapshot();

    for index in [1, usize::MAX] {
        let err = store.update_section_item(index, award("X")).unwrap_err();
        assert_eq!(
            err,
            StoreError::IndexOutOfRange {
                section: SectionName::Awards,
                index,
                len: 1,
            }
        );
        assert!(store.remove_section_item::<Award>(index).is_err());
        assert!(store.move_section_item::<Award>(0, index).is_err());
        assert!(store.set_item_visible::<Award>(index, false).is_err());
    }

    assert!(Arc::ptr_eq(&snapshot, &store.snapshot()));
}

#[test]
fn appended_entries_keep_insertion_order() {
    let (mut store, _) = open_store();
    for name in ["a", "b", "a"] {
        store
            .append_section_item(Skill {
                name: name.to_string(),
                ..Skill::default()
            })
            .unwrap();
    }

    let names: Vec<String> = store
        .section::<Skill>()
        .iter()
        .map(|skill| skill.name.clone())
        .collect();
    assert_eq!(names, vec!["a", "b", "a"]);
}

#[test]
fn every_mutation_strictly_increases_updated_at() {
    let (mut store, clock) = open_store();
    let other = store.create_resume("Other");
    let active = store.create_resume("Active");
    let other_stamp = store.get(&other).unwrap().metadata.updated_at;

    let mut previous = store.data().metadata.updated_at;
    // Clock frozen: stamps still advance.
    for title in ["a", "b", "c"] {
        store.append_section_item(award(title)).unwrap();
        let stamp = store.data().metadata.updated_at;
        assert!(stamp > previous);
        previous = stamp;
    }

    clock.set(50);
    store.set_item_visible::<Award>(0, false).unwrap();
    assert!(store.data().metadata.updated_at > previous);

    assert_eq!(store.current_resume_id(), Some(active.as_str()));
    assert_eq!(store.get(&other).unwrap().metadata.updated_at, other_stamp);
}

#[test]
fn failed_mutation_leaves_timestamp_alone() {
    let (mut store, clock) = open_store();
    let before = store.data().metadata.updated_at;
    clock.advance(10);

    assert!(store.update_section_item(0, award("x")).is_err());
    assert_eq!(store.data().metadata.updated_at, before);
}

#[test]
fn named_wrappers_match_generic_update() {
    let (mut store, _) = open_store();
    let entries = vec![Arc::new(award("A")), Arc::new(award("B"))];

    store.update_awards(entries.clone()).unwrap();
    let via_wrapper = store.data().sections.awards.clone();
    store.update_section(entries).unwrap();
    let via_generic = store.data().sections.awards.clone();

    assert_eq!(via_wrapper, via_generic);
    assert!(Arc::ptr_eq(&via_wrapper[0], &via_generic[0]));
}

#[test]
fn tagged_replace_routes_by_variant() {
    let (mut store, _) = open_store();
    let work = Arc::new(vec![Arc::new(Work {
        name: "Acme".into(),
        ..Work::default()
    })]);

    store
        .replace_section(SectionEntries::Work(Arc::clone(&work)))
        .unwrap();
    assert!(Arc::ptr_eq(&store.data().sections.work, &work));
    assert_eq!(
        store.section_by_name(SectionName::Work),
        SectionEntries::Work(work)
    );
}

#[test]
fn tagged_item_replace_rejects_entry_of_other_section() {
    let (mut store, _) = open_store();
    store.append_section_item(award("A")).unwrap();

    let err = store
        .replace_section_item(SectionName::Awards, 0, AnyEntry::Skills(Skill::default()))
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::SectionMismatch {
            expected: SectionName::Awards,
            actual: SectionName::Skills,
        }
    );

    store
        .replace_section_item(SectionName::Awards, 0, AnyEntry::Awards(award("B")))
        .unwrap();
    assert_eq!(store.data().sections.awards[0].title, "B");
}

#[test]
fn move_and_visibility_by_name() {
    let (mut store, _) = open_store();
    for title in ["one", "two", "three"] {
        store.append_any(AnyEntry::Awards(award(title))).unwrap();
    }

    store.move_item_by_name(SectionName::Awards, 2, 0).unwrap();
    store.set_visible_by_name(SectionName::Awards, 1, false).unwrap();
    store.remove_item_by_name(SectionName::Awards, 2).unwrap();

    let awards = store.section::<Award>();
    let titles: Vec<&str> = awards.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["three", "one"]);
    assert_eq!(awards[1].visible, Some(false));
    assert_eq!(
        store.section_by_name(SectionName::Awards).visibility(),
        vec![true, false]
    );
}

#[test]
fn update_basics_shares_sections() {
    let (mut store, _) = open_store();
    store.append_section_item(award("A")).unwrap();
    let before = store.data();

    let mut basics = resume_core::Basics::clone(&before.basics);
    basics.name = "Ada Lovelace".into();
    store.update_basics(basics).unwrap();

    let after = store.data();
    assert_eq!(after.basics.name, "Ada Lovelace");
    assert_eq!(after.sections, before.sections);
    assert!(Arc::ptr_eq(&before.sections.awards, &after.sections.awards));
}
