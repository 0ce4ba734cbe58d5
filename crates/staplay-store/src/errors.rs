//! Store error constructors
//!
//! Every fallible store call returns `ExError`; these build the ones the
//! store raises itself and classify SQLite failures.

use rusqlite::ErrorCode;
use staplay_core::errors::{ExError, ExErrorKind};

pub type Result<T> = std::result::Result<T, ExError>;

/// A migration step could not be applied or its record is unreadable
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_entity(migration_id)
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// An applied step's recorded checksum differs from the embedded SQL
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_entity(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// The store was written by a build with a newer schema
pub fn schema_too_new(stored: u32, supported: u32) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!(
            "Store is at schema version {} but this build supports up to {}",
            stored, supported
        ))
}

/// Classify a SQLite failure
///
/// Constraint failures become `ConstraintViolation` and busy/locked
/// failures (the busy timeout ran out) become `Timeout`. Anything else is
/// `Persistence`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(ffi_err, _) => match ffi_err.code {
            ErrorCode::ConstraintViolation => ExErrorKind::ConstraintViolation,
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => ExErrorKind::Timeout,
            _ => ExErrorKind::Persistence,
        },
        _ => ExErrorKind::Persistence,
    };

    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
