//! Booking Core
//!
//! The reservation admission pipeline: a request passes through the
//! timezone normalizer ([`clock`]), the operating calendar ([`calendar`]),
//! the availability engine ([`availability`]) and finally the atomic
//! booking transaction ([`transaction`]).
//!
//! Business outcomes (closed, full, no table) are typed values on
//! [`BookingError`], never panics; only storage failures take the
//! infrastructure path.

pub mod availability;
pub mod calendar;
pub mod clock;
pub mod transaction;

pub use calendar::OperatingWeek;
pub use clock::NormalizedInstant;
pub use transaction::{BookingRequest, create_reservation, list_available, remaining_capacity};

use crate::db::repository::RepoError;
use http::StatusCode;

/// Typed booking outcome
///
/// Input and business-rule rejections are expected, user-facing results;
/// callers present them directly. `Storage` alone is an infrastructure
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    // ========== Input errors ==========
    #[error("Party size must be at least 1")]
    InvalidPartySize,

    #[error("Invalid reservation instant: {0}")]
    InvalidInstant(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== Business-rule errors ==========
    #[error("Venue is closed at the requested time")]
    VenueClosed,

    #[error("No table is available for the requested slot")]
    NoAvailability,

    #[error("Daily capacity would be exceeded")]
    CapacityExceeded,

    // ========== Authorization ==========
    #[error("Not authorized for this venue")]
    Unauthorized,

    // ========== Infrastructure ==========
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl BookingError {
    /// HTTP status and stable error code for the response envelope
    pub fn http_code(&self) -> (StatusCode, &'static str) {
        match self {
            BookingError::InvalidPartySize => (StatusCode::BAD_REQUEST, "R1004"),
            BookingError::InvalidInstant(_) => (StatusCode::BAD_REQUEST, "R1005"),
            BookingError::Validation(_) => (StatusCode::BAD_REQUEST, "E0002"),
            BookingError::VenueClosed => (StatusCode::UNPROCESSABLE_ENTITY, "R1001"),
            BookingError::NoAvailability => (StatusCode::CONFLICT, "R1002"),
            BookingError::CapacityExceeded => (StatusCode::CONFLICT, "R1003"),
            BookingError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001"),
            BookingError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E9002"),
        }
    }

    /// SQLITE_BUSY-class contention, the only retryable failure
    pub fn is_lock_contention(&self) -> bool {
        match self {
            BookingError::Storage(msg) => {
                let msg = msg.to_lowercase();
                msg.contains("locked") || msg.contains("busy")
            }
            _ => false,
        }
    }
}

impl From<RepoError> for BookingError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Database(msg) => BookingError::Storage(msg),
            RepoError::Validation(msg) => BookingError::Validation(msg),
            RepoError::NotFound(msg) | RepoError::Duplicate(msg) => BookingError::Validation(msg),
        }
    }
}

impl From<sqlx::Error> for BookingError {
    fn from(e: sqlx::Error) -> Self {
        BookingError::Storage(e.to_string())
    }
}
