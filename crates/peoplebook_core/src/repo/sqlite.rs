//! SQLite-backed repository handle and shared persistence helpers.
//!
//! # Invariants
//! - A handle only exists for connections at the latest schema version.
//! - Every mutation runs in one `IMMEDIATE` transaction; an error drops the
//!   transaction, which rolls it back.

use crate::db::migrations::latest_version;
use crate::repo::error::{RepoError, RepoResult};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use uuid::Uuid;

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "people",
        &[
            "seq",
            "uuid",
            "name",
            "age",
            "gender",
            "family_uuid",
            "created_at",
            "updated_at",
        ],
    ),
    (
        "families",
        &["seq", "uuid", "name", "created_at", "updated_at"],
    ),
];

/// Repository over a migrated SQLite connection.
///
/// Implements both [`PersonRepository`](crate::repo::person_repo::PersonRepository)
/// and [`FamilyRepository`](crate::repo::family_repo::FamilyRepository).
pub struct SqliteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &*self.conn
    }

    /// Runs `op` inside one write transaction and commits it.
    pub(crate) fn write<T>(
        &mut self,
        op: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(RepoError::write)?;
        let value = op(&tx)?;
        tx.commit().map_err(RepoError::write)?;
        Ok(value)
    }
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn row_exists(conn: &Connection, table: &'static str, uuid: Uuid) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE uuid = ?1);"),
        [uuid.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
