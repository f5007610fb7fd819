//! Repository error type.

use crate::db::DbError;
use crate::model::family::{FamilyId, FamilyValidationError};
use crate::model::person::{PersonId, PersonValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors surfaced by people/family repositories.
///
/// Storage failures are split by direction: `StorageRead` for fetches and
/// `StorageWrite` for anything that failed to commit.
#[derive(Debug)]
pub enum RepoError {
    /// Person fields failed validation before or after storage.
    Validation(PersonValidationError),
    /// Family fields failed validation before or after storage.
    FamilyValidation(FamilyValidationError),
    /// A fetch could not be completed.
    StorageRead(DbError),
    /// A mutation could not be committed; nothing was applied.
    StorageWrite(DbError),
    PersonNotFound(PersonId),
    FamilyNotFound(FamilyId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid entity.
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn write(err: rusqlite::Error) -> Self {
        Self::StorageWrite(DbError::Sqlite(err))
    }

    /// Returns whether the operation targeted a person or family that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PersonNotFound(_) | Self::FamilyNotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::FamilyValidation(err) => write!(f, "{err}"),
            Self::StorageRead(err) => write!(f, "storage read failed: {err}"),
            Self::StorageWrite(err) => write!(f, "storage write failed: {err}"),
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::FamilyNotFound(id) => write!(f, "family not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "people repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "people repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "people repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::FamilyValidation(err) => Some(err),
            Self::StorageRead(err) | Self::StorageWrite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersonValidationError> for RepoError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<FamilyValidationError> for RepoError {
    fn from(value: FamilyValidationError) -> Self {
        Self::FamilyValidation(value)
    }
}

/// Plain `?` on a SQLite error classifies it as a read failure; write paths
/// map explicitly with [`RepoError::write`].
impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageRead(DbError::Sqlite(value))
    }
}
