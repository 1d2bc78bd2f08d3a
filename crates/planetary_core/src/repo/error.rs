//! Repository error taxonomy.
//!
//! # Invariants
//! - SQLite constraint violations (foreign key, NOT NULL, CHECK, trigger
//!   aborts) always surface as `Integrity`, never as a generic DB error.
//! - No variant is retryable; callers surface every failure.

use crate::db::DbError;
use crate::model::validation::{RecordId, ValidationError};
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Field assignment was rejected before reaching storage.
    Validation(ValidationError),
    /// Transport/bootstrap failure from SQLite.
    Db(DbError),
    /// Storage rejected the write because a constraint was violated.
    Integrity(String),
    /// Target row does not exist.
    NotFound { entity: &'static str, id: RecordId },
    /// Update/delete was requested for a record that was never inserted.
    Unsaved(&'static str),
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
    /// Persisted row cannot be turned into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Integrity(message) => write!(f, "integrity violation: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Unsaved(entity) => write!(f, "{entity} has not been saved yet"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::Integrity(message.unwrap_or_else(|| failure.to_string()))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}
