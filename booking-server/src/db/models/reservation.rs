//! Reservation Model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reservation lifecycle status
///
/// CANCELLED and NO_SHOW stop counting against capacity and table occupancy
/// the moment they are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Seated,
    NoShow,
    Cancelled,
}

impl ReservationStatus {
    /// Whether a reservation in this status still occupies its table / counts
    /// toward the daily pax sum
    pub fn occupies(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled | ReservationStatus::NoShow)
    }
}

/// Reservation entity
///
/// `table_id` is NULL in simple mode. Customer contact fields are a snapshot
/// taken at booking time, not a foreign key into a live profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: i64,
    pub tenant_id: String,
    pub table_id: Option<i64>,
    /// Canonical UTC instant of the reservation start, Unix millis
    pub start_ms: i64,
    /// Local service date (YYYY-MM-DD) the instant falls into
    pub service_date: String,
    pub party_size: i64,
    pub status: ReservationStatus,
    /// Promoter attribution, captured at creation and immutable thereafter
    pub promoter_id: Option<i64>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub created_at_ms: i64,
}

/// Customer contact snapshot, denormalized at booking time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Row to insert when a booking commits
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub tenant_id: String,
    pub table_id: Option<i64>,
    pub start_ms: i64,
    pub service_date: String,
    pub party_size: i64,
    pub status: ReservationStatus,
    pub promoter_id: Option<i64>,
    pub customer: CustomerContact,
}
