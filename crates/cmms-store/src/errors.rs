//! Error handling for cmms-store
//!
//! Wraps cmms-core ExError with store-specific helpers

use cmms_core::errors::{CmmsError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error from serde_json::Error
pub fn from_serde_json(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an image corruption error
pub fn image_corrupt(storage_key: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::ImageCorrupt)
        .with_op("restore_image")
        .with_entity_id(storage_key.to_string())
        .with_message(reason.to_string())
}

/// Create an error for operations that need an open context
pub fn not_initialized(operation: &str) -> ExError {
    ExError::new(ExErrorKind::NotInitialized)
        .with_op(operation.to_string())
        .with_message("persistence context is not open")
}

/// Create a not-found error for a record lookup
pub fn record_not_found(table: &str, id: &str) -> ExError {
    ExError::from(CmmsError::RecordNotFound {
        entity: table.to_string(),
        id: id.to_string(),
    })
}

/// Map a rusqlite write error, classifying CHECK/NOT NULL failures separately
pub fn from_rusqlite_write(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ExErrorKind::ConstraintViolation
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite_write")
        .with_message(err.to_string())
}
