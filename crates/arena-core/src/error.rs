//! Error types for arena-core

use thiserror::Error;

/// Result type for arena-core operations
pub type Result<T> = std::result::Result<T, ArenaError>;

/// arena-core error types
#[derive(Debug, Error, PartialEq)]
pub enum ArenaError {
    /// A vector would end up with no length (and therefore no direction)
    #[error("vector can not have zero length")]
    ZeroLengthVector,

    /// The two lines never cross
    #[error("invalid points, they may be in the same line")]
    ParallelLines,

    /// The lines cross outside the representable coordinates
    #[error("lines cross outside the coordinate range")]
    OutOfRange,

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ArenaError {
    fn from(err: serde_json::Error) -> Self {
        ArenaError::SerializationError(err.to_string())
    }
}
