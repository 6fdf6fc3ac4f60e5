use resume_core::persist::codec::{decode_state, encode_state};
use resume_core::{
    create_empty, Award, DocumentStore, Education, JsonFileAdapter, MemoryAdapter, NoticeKind,
    PersistenceAdapter, SectionEntry, SqliteAdapter, StoreOptions,
};
use serde_json::json;

fn populate(store: &mut DocumentStore) {
    store
        .append_section_item(Award {
            title: "Turing".into(),
            awarder: Some("ACM".into()),
            ..Award::default()
        })
        .unwrap();
    store
        .append_section_item(create_empty::<Education>())
        .unwrap();
    store.set_item_visible::<Award>(0, true).unwrap();
    store.create_resume("Second");
    store.set_page_wrap(true);
}

#[test]
fn memory_reload_is_byte_identical() {
    let adapter = MemoryAdapter::new();
    let mut store = DocumentStore::open(Box::new(adapter.clone()), StoreOptions::default());
    populate(&mut store);
    let first = adapter.encoded().unwrap();

    let reloaded = MemoryAdapter::with_encoded(first.clone());
    let mut store = DocumentStore::open(Box::new(reloaded.clone()), StoreOptions::default());
    assert_eq!(reloaded.save_count(), 0);
    assert!(store.flush());
    assert_eq!(reloaded.encoded().unwrap(), first);
}

#[test]
fn json_file_reload_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("resumes.json");

    let mut store = DocumentStore::open(
        Box::new(JsonFileAdapter::new(&path)),
        StoreOptions::default(),
    );
    populate(&mut store);
    let expected_current = store.current_resume_id().map(str::to_string);
    drop(store);
    let first = std::fs::read_to_string(&path).unwrap();

    let mut adapter = JsonFileAdapter::new(&path);
    let state = adapter.load().unwrap().unwrap();
    assert_eq!(state.len(), 2);
    assert!(state.page_wrap());
    assert_eq!(state.current_resume_id(), expected_current.as_deref());

    adapter.save(&state).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn missing_json_file_seeds_and_saves_one_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.json");

    let store = DocumentStore::open(
        Box::new(JsonFileAdapter::new(&path)),
        StoreOptions::default(),
    );
    assert_eq!(store.list_resumes().len(), 1);
    assert!(path.exists());
    assert!(store.notices().is_empty());
}

#[test]
fn sqlite_reload_restores_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.sqlite3");

    let mut store = DocumentStore::open(
        Box::new(SqliteAdapter::open(&path).unwrap()),
        StoreOptions::default(),
    );
    populate(&mut store);
    let before = store.snapshot();
    drop(store);

    let store = DocumentStore::open(
        Box::new(SqliteAdapter::open(&path).unwrap()),
        StoreOptions::default(),
    );
    assert_eq!(*store.snapshot(), *before);

    let mut first = SqliteAdapter::open(&path).unwrap();
    let state = first.load().unwrap().unwrap();
    assert_eq!(encode_state(&state).unwrap(), encode_state(&before).unwrap());
}

#[test]
fn empty_entry_is_visible_after_reload() {
    let adapter = MemoryAdapter::new();
    let mut store = DocumentStore::open(Box::new(adapter.clone()), StoreOptions::default());
    store
        .append_section_item(create_empty::<Education>())
        .unwrap();

    let encoded = adapter.encoded().unwrap();
    assert!(!encoded.contains("\"visible\""));

    let state = decode_state(&encoded).unwrap();
    let education = &state.current().unwrap().sections.education;
    assert_eq!(education.len(), 1);
    assert_eq!(education[0].visible, None);
    assert!(education[0].is_visible());
}

#[test]
fn malformed_documents_are_skipped_on_load() {
    let raw = json!({
        "currentResumeId": "broken",
        "resumes": {
            "broken": { "basics": { "name": "no metadata" } },
            "ok": { "_metadata": { "id": "ok", "name": "Fine", "updatedAt": 7 } },
            "bad-shape": { "_metadata": { "id": "bad-shape" }, "awards": "nope" }
        }
    })
    .to_string();

    let store = DocumentStore::open(
        Box::new(MemoryAdapter::with_encoded(raw)),
        StoreOptions::default(),
    );
    let resumes = store.list_resumes();
    assert_eq!(resumes.len(), 1);
    assert_eq!(resumes[0].id(), "ok");
    assert_eq!(store.current_resume_id(), Some("ok"));
}

#[test]
fn save_failure_keeps_state_and_raises_notice() {
    let adapter = MemoryAdapter::new();
    let mut store = DocumentStore::open(Box::new(adapter.clone()), StoreOptions::default());
    let saved_before = adapter.encoded().unwrap();

    adapter.set_fail_saves(true);
    store
        .append_section_item(Award {
            title: "Unsaved".into(),
            ..Award::default()
        })
        .unwrap();

    assert_eq!(store.data().sections.awards.len(), 1);
    assert_eq!(adapter.encoded().unwrap(), saved_before);
    let notices = store.notices().to_vec();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::PersistenceFailure);

    adapter.set_fail_saves(false);
    assert!(store.flush());
    assert!(adapter.encoded().unwrap().contains("Unsaved"));

    assert!(store.dismiss_notice(notices[0].id));
    assert!(!store.dismiss_notice(notices[0].id));
    assert!(store.notices().is_empty());
}

#[test]
fn load_failure_starts_fresh_without_overwriting() {
    let adapter = MemoryAdapter::with_encoded("{ not json");
    let store = DocumentStore::open(Box::new(adapter.clone()), StoreOptions::default());

    assert_eq!(store.list_resumes().len(), 1);
    assert_eq!(store.notices().len(), 1);
    assert_eq!(store.notices()[0].kind, NoticeKind::LoadFailure);
    assert_eq!(adapter.save_count(), 0);
    assert_eq!(adapter.encoded().unwrap(), "{ not json");
}
