//! Error handling for captrack-store
//!
//! Wraps captrack-core ExError with interchange-specific helpers

use captrack_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Message shown when a capability CSV lacks one of the required columns
pub const MISSING_HEADERS_MESSAGE: &str =
    "CSV file must have headers: Name, Workstream, Lead, SME, BA, Status, RAG";

/// Create an import validation error (whole file rejected)
pub fn import_validation(op: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(op.to_string())
        .with_message(reason)
}

/// Create a seed validation error
pub fn seed_validation(reason: impl Into<String>) -> ExError {
    import_validation("seed_parse", reason)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error from anything displayable
pub fn serialization_error(operation: &str, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
