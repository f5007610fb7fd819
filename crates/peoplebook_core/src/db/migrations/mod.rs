//! Ordered schema migrations for the people store.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - All pending migrations commit together or not at all.
//! - A rejected step is reported by its version.
//! - The applied version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_people.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_families.sql"),
    },
];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies every migration newer than the connection's current version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    apply_migrations_up_to(conn, latest_version())
}

/// Brings the schema to exactly `target`, applying pending steps in order.
///
/// All steps run in one transaction; a failing step leaves the database at
/// the version it had before the call.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database or `target` is newer than
///   this binary.
/// - `MigrationFailed` naming the step whose SQL was rejected.
pub fn apply_migrations_up_to(conn: &mut Connection, target: u32) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest || target > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version.max(target),
            latest_supported: latest,
        });
    }
    if current_version >= target {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending(current_version, target) {
        if let Err(err) = run_step(&tx, migration) {
            error!(
                "event=db_migrate module=db status=error error_code=migration_failed from_version={current_version} failed_version={}",
                migration.version
            );
            return Err(DbError::MigrationFailed {
                version: migration.version,
                source: err,
            });
        }
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={current_version} to_version={target}"
    );
    Ok(())
}

fn pending(current_version: u32, target: u32) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS
        .iter()
        .skip_while(move |migration| migration.version <= current_version)
        .take_while(move |migration| migration.version <= target)
}

fn run_step(tx: &Transaction<'_>, migration: &Migration) -> rusqlite::Result<()> {
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
