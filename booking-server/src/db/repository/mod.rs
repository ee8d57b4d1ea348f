//! Repository Module
//!
//! Free functions over `&SqlitePool` (or a transaction connection where the
//! booking transaction needs them), one module per entity.

// Floor model
pub mod dining_table;
pub mod zone;

// Reference data
pub mod operating_day;
pub mod settings;

// Booking
pub mod promoter;
pub mod reservation;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
