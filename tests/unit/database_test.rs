//! Unit tests for the keyweb database layer (connection + migrations).

use keyweb::database::migrations::{get_schema_version, run_all, CURRENT_SCHEMA_VERSION};
use keyweb::database::Database;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_history_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    for table in ["history", "schema_version"] {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "Table '{}' should exist after migrations", table);
    }
}

#[test]
fn test_migrations_create_timestamp_index() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='index' AND name='idx_history_timestamp'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "idx_history_timestamp should exist after migrations");
}

#[test]
fn test_schema_version_is_current() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    // Running migrations a second time should not fail
    let result = run_all(db.connection());
    assert!(result.is_ok(), "Running migrations twice should succeed (idempotent)");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_open_file_database_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("profile").join("history");

    let db = Database::open(&db_path);
    assert!(db.is_ok(), "open with file path should succeed");
    assert!(db_path.exists(), "Database file should exist on disk");
}

#[test]
fn test_history_timestamp_is_unique() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    conn.execute(
        "INSERT INTO history (timestamp, scheme, address) VALUES (1700000000000, 'https', '//example.com')",
        [],
    )
    .expect("Should insert into history");

    let duplicate = conn.execute(
        "INSERT INTO history (timestamp, scheme, address) VALUES (1700000000000, 'http', '//other.com')",
        [],
    );
    assert!(duplicate.is_err(), "A second row with the same timestamp must be rejected");
}

#[test]
fn test_history_columns_are_required() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let result = db.connection().execute(
        "INSERT INTO history (timestamp, scheme, address) VALUES (1, NULL, '//example.com')",
        [],
    );
    assert!(result.is_err(), "scheme is NOT NULL");
}
