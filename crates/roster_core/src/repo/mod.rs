//! Repository contracts and shared persistence plumbing.
//!
//! # Responsibility
//! - Define the umbrella error type shared by both mappers.
//! - Guard repositories against unmigrated connections.
//!
//! # Invariants
//! - Validation failures surface before any SQL mutation runs.
//! - Storage-layer errors propagate unmodified inside `RepoError::Db`.

use crate::db::{migrations, DbError};
use crate::model::ValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_repo;
pub mod employee_repo;
pub mod identity;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error surface for every mapper operation.
#[derive(Debug)]
pub enum RepoError {
    /// Field invariant violated; nothing was written.
    Validation(ValidationError),
    /// Storage-layer failure, passed through untranslated.
    Db(DbError),
    /// Operation requires a persisted row id but the instance has none.
    NotPersisted { entity: &'static str },
    /// A write targeted a row id that no longer exists.
    NotFound(i64),
    /// The connection's schema version does not match this binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted state violates model invariants; rejected instead of masked.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotPersisted { entity } => {
                write!(f, "{entity} is not persisted in the database")
            }
            Self::NotFound(id) => write!(f, "no row found for id {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through roster_core::db"
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
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections whose `user_version` was not brought up to date by
/// `db::open_db`/`open_db_in_memory`.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = migrations::latest_version();
    let actual_version = migrations::current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}
