//! SQLite storage bootstrap, schema definitions and migrations.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the planetary core.
//! - Declare tables and render DDL with deterministic constraint names.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write records before migrations succeed.
//! - Every connection handed out has `foreign_keys=ON`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
pub mod naming;
mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Constraint name template could not be rendered.
    Naming {
        template: String,
        token: String,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Naming { template, token } => write!(
                f,
                "naming template `{template}` uses unavailable token `{token}`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Naming { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
