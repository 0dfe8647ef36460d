//! Store error types.

use thiserror::Error;

/// Error type for event store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Payload (de)serialization failed.
    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Creating the database directory failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored timestamp could not be parsed back.
    #[error("invalid stored timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// No event exists with the requested id.
    #[error("no event with id {0}")]
    NotFound(i64),
}
