use peoplebook_core::db::migrations::{
    apply_migrations, apply_migrations_up_to, latest_version,
};
use peoplebook_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(latest_version(), 2);
    assert!(table_exists(&conn, "people"));
    assert!(table_exists(&conn, "families"));
    assert!(column_names(&conn, "people").contains(&"family_uuid".to_string()));
}

#[test]
fn foreign_keys_are_enabled_on_opened_connections() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let err = conn.execute(
        "INSERT INTO people (uuid, name, family_uuid) VALUES ('p', 'x', 'no-such-family');",
        [],
    );
    assert!(err.is_err(), "dangling family link must be rejected");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("peoplebook.db");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert!(table_exists(&second, "people"));
}

#[test]
fn version_one_database_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v1.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE people (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            name TEXT,
            age INTEGER NOT NULL DEFAULT 20 CHECK (age >= 0),
            gender TEXT NOT NULL DEFAULT 'Male',
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000),
            updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
        );
        INSERT INTO people (uuid, name)
        VALUES ('11111111-2222-4333-8444-555555555555', 'Alice');
        PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert!(table_exists(&conn, "families"));
    let name: String = conn
        .query_row("SELECT name FROM people;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "Alice");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
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
fn migrations_can_be_applied_one_step_at_a_time() {
    let mut conn = Connection::open_in_memory().unwrap();

    apply_migrations_up_to(&mut conn, 1).unwrap();
    assert_eq!(schema_version(&conn), 1);
    assert!(table_exists(&conn, "people"));
    assert!(!table_exists(&conn, "families"));
    assert!(!column_names(&conn, "people").contains(&"family_uuid".to_string()));

    // Lower targets never downgrade.
    apply_migrations_up_to(&mut conn, 0).unwrap();
    assert_eq!(schema_version(&conn), 1);

    apply_migrations(&mut conn).unwrap();
    assert_eq!(schema_version(&conn), 2);
    assert!(table_exists(&conn, "families"));
    assert!(column_names(&conn, "people").contains(&"family_uuid".to_string()));
}

#[test]
fn target_beyond_latest_version_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();

    let err = apply_migrations_up_to(&mut conn, latest_version() + 1).unwrap_err();

    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { latest_supported, .. } if latest_supported == latest_version()
    ));
    assert_eq!(schema_version(&conn), 0);
}

#[test]
fn rejected_migration_step_is_named_and_rolled_back() {
    let mut conn = Connection::open_in_memory().unwrap();
    apply_migrations_up_to(&mut conn, 1).unwrap();
    // A stray column makes step 2's ALTER TABLE fail.
    conn.execute_batch("ALTER TABLE people ADD COLUMN family_uuid TEXT;").unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();

    assert!(matches!(err, DbError::MigrationFailed { version: 2, .. }));
    assert!(err.to_string().starts_with("migration 2 failed"));
    assert_eq!(schema_version(&conn), 1);
    assert!(!table_exists(&conn, "families"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
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
    exists == 1
}

fn column_names(conn: &Connection, table_name: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table_name});"))
        .unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut columns = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        columns.push(row.get::<_, String>(1).unwrap());
    }
    columns
}
