//! Tests for schema migrations and connection setup.

use rusqlite::Connection;
use warnline_storage::connection::pragmas::verify_wal_mode;
use warnline_storage::migrations::{current_version, run_migrations, LATEST_VERSION};
use warnline_storage::queries::build_results::{count, insert_gap};
use warnline_storage::queries::warnings::count_by_fingerprint;
use warnline_storage::DatabaseManager;

#[test]
fn migrations_bring_fresh_database_to_latest() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(current_version(&conn).unwrap(), 0);
    run_migrations(&conn).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn migrations_are_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn file_database_uses_wal() {
    let dir = tempfile::TempDir::new().unwrap();
    let db = DatabaseManager::open(&dir.path().join("w.db")).unwrap();
    assert!(db.with_writer(|conn| verify_wal_mode(conn)).unwrap());
    db.checkpoint().unwrap();
}

#[test]
fn fingerprint_index_is_queryable() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let n = db
        .with_reader(|conn| count_by_fingerprint(conn, "default", 42))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn every_pooled_reader_sees_committed_writes() {
    let dir = tempfile::TempDir::new().unwrap();
    let db = DatabaseManager::open(&dir.path().join("w.db")).unwrap();
    db.with_writer(|conn| insert_gap(conn, "default", 1, 0)).unwrap();

    // More reads than pooled connections, so each reader is used.
    for _ in 0..4 {
        let n = db.with_reader(|conn| count(conn, "default")).unwrap();
        assert_eq!(n, 1);
    }
}
