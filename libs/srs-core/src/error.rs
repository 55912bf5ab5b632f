//! Error types for srs-core.

use thiserror::Error;

/// Result type alias using SrsError.
pub type Result<T> = std::result::Result<T, SrsError>;

/// Errors raised by the scheduling engine and its store boundary.
#[derive(Debug, Error, PartialEq)]
pub enum SrsError {
    #[error("invalid quality rating {0}: expected 0 (again) through 3 (easy)")]
    InvalidQuality(i64),

    #[error("unknown quality rating {0:?}: expected again, hard, good, easy or 0-3")]
    UnknownQuality(String),

    #[error("card {0} not found")]
    CardNotFound(i64),

    #[error("duplicate card id {0}")]
    DuplicateId(i64),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("study session has no cards left")]
    SessionComplete,
}
