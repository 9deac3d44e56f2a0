use chrono::NaiveDate;
use notepad_core::db::schema::latest_version;
use notepad_core::db::{open_db, open_db_in_memory, DbError};
use notepad_core::{Memo, PostStore, SqlitePostStore, StoreConfig, Task};
use rusqlite::Connection;

const LEGACY_POSTS_SQL: &str = "CREATE TABLE posts (
    type TEXT NOT NULL,
    created_at TEXT NOT NULL,
    text TEXT,
    url TEXT,
    due_date TEXT
);";

#[test]
fn open_db_in_memory_creates_posts_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "posts");
    let columns = table_columns(&conn, "posts");
    for column in ["type", "created_at", "text", "url", "due_date", "due_on"] {
        assert!(
            columns.iter().any(|name| name == column),
            "posts.{column} is missing"
        );
    }
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notepad.sqlite");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO posts (type, created_at, text) VALUES ('Memo', '2025-01-02 03:04:05 +0000', 'kept');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM posts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite");

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
}

#[test]
fn legacy_posts_table_gains_due_on_and_accepts_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notepad.sqlite");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(LEGACY_POSTS_SQL).unwrap();
    conn.execute(
        "INSERT INTO posts (type, created_at, text) VALUES ('Memo', '2024-05-06 07:08:09 +0000', 'old');",
        [],
    )
    .unwrap();
    drop(conn);

    let store = SqlitePostStore::new(StoreConfig::new(&path));
    let memo_id = store.insert(&Memo::with_body("new memo")).unwrap();
    let due = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    let task_id = store
        .insert(&Task::with_details("Ship release", due))
        .unwrap();
    assert_eq!((memo_id, task_id), (2, 3));

    let loaded = store.find_by_id(task_id).unwrap().expect("task row");
    assert_eq!(loaded.downcast_ref::<Task>().unwrap().due_date(), due);
    assert_eq!(store.find_by_id(1).unwrap().expect("legacy row").body(), "old");

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert!(table_columns(&conn, "posts").iter().any(|name| name == "due_on"));
}

#[test]
fn current_version_without_due_on_is_repaired_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notepad.sqlite");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(LEGACY_POSTS_SQL).unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert!(table_columns(&conn, "posts").iter().any(|name| name == "due_on"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_columns(conn: &Connection, table_name: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table_name});"))
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
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
