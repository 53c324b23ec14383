//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 failures are wrapped in [`StorageError`] and converted to
//! the database-agnostic errors of `pocketledger_core` before they leave the
//! crate.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pocketledger_core::errors::{DatabaseError, Error};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// A domain error raised inside a write job; passed through untouched.
    #[error(transparent)]
    Core(#[from] Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::NotFound("Record".to_string())
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::ConstraintViolation(info.message().to_string()),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::CheckViolation,
                info,
            )) => Error::ConstraintViolation(info.message().to_string()),
            // SQLite reports deferred and statement-level FK failures without a kind.
            StorageError::QueryFailed(DieselError::DatabaseError(DatabaseErrorKind::Unknown, info))
                if info.message().contains("FOREIGN KEY constraint failed") =>
            {
                Error::ConstraintViolation(info.message().to_string())
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::CorruptRow(e) => Error::Database(DatabaseError::CorruptRow(e)),
            StorageError::Core(e) => e,
        }
    }
}

/// Extension trait for converting Diesel and r2d2 results into core results.
///
/// `.into_core()` routes the error through [`StorageError`].
pub trait IntoCore<T> {
    fn into_core(self) -> pocketledger_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> pocketledger_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> pocketledger_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

/// Lookup helper: `diesel::NotFound` becomes `Error::NotFound(entity)`.
pub(crate) fn or_not_found<T>(
    result: std::result::Result<T, DieselError>,
    entity: &str,
) -> pocketledger_core::Result<T> {
    match result {
        Err(DieselError::NotFound) => Err(Error::not_found(entity)),
        other => other.into_core(),
    }
}
