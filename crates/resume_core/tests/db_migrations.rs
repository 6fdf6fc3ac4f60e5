use resume_core::db::migrations::latest_version;
use resume_core::db::{open_db, open_db_in_memory, DbError};
use resume_core::{
    DocumentStore, PersistError, PersistenceAdapter, SqliteAdapter, StoreOptions,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "resumes");
    assert_table_exists(&conn, "store_meta");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "resumes");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    match SqliteAdapter::open(&path) {
        Err(PersistError::Db(DbError::UnsupportedSchemaVersion { .. })) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("adapter opened a database from the future"),
    }
}

#[test]
fn empty_database_loads_as_nothing_stored() {
    let mut adapter = SqliteAdapter::open_in_memory().unwrap();
    assert!(adapter.load().unwrap().is_none());
}

#[test]
fn save_writes_one_row_per_document_and_meta() {
    let mut store = DocumentStore::open(
        Box::new(SqliteAdapter::open_in_memory().unwrap()),
        StoreOptions::default(),
    );
    store.create_resume("Second");
    store.set_page_wrap(true);
    let current = store.current_resume_id().unwrap().to_string();
    let state = store.snapshot();

    let mut adapter = SqliteAdapter::open_in_memory().unwrap();
    adapter.save(&state).unwrap();
    let conn = adapter.connection();

    assert_eq!(count(conn, "SELECT COUNT(*) FROM resumes;"), 2);
    assert_eq!(meta(conn, "current_resume_id"), Some(current));
    assert_eq!(meta(conn, "page_wrap"), Some("true".to_string()));
}

#[test]
fn unreadable_row_is_skipped_on_load() {
    let mut store = DocumentStore::open(
        Box::new(SqliteAdapter::open_in_memory().unwrap()),
        StoreOptions::default(),
    );
    store.create_resume("Kept");
    let state = store.snapshot();

    let mut adapter = SqliteAdapter::open_in_memory().unwrap();
    adapter.save(&state).unwrap();
    adapter
        .connection()
        .execute(
            "INSERT INTO resumes (id, updated_at, body) VALUES ('junk', 0, 'not json');",
            [],
        )
        .unwrap();

    let loaded = adapter.load().unwrap().unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.get("junk").is_none());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

fn meta(conn: &Connection, key: &str) -> Option<String> {
    conn.query_row(
        "SELECT value FROM store_meta WHERE key = ?1;",
        [key],
        |row| row.get(0),
    )
    .ok()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
