//! Repository layer: the only code allowed to talk to the storage engine.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for people and families.
//! - Isolate SQLite query details from controllers and services.
//!
//! # Invariants
//! - Every mutation commits durably before returning, or leaves no trace.
//! - Errors are returned, never logged and dropped; there are no retries.
//! - Callers observe changes by re-listing; there are no change observers.

pub mod error;
pub mod family_repo;
pub mod person_repo;
mod sqlite;

pub use sqlite::SqliteRepository;
