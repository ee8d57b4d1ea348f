//! Reservation Settings Model (per-tenant singleton)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Per-tenant reservation behavior switches
///
/// `standard_time_enabled` selects duration-aware slotting; when it is off a
/// table is blocked for the whole service day once any reservation lands on
/// it. `simple_mode` drops table assignment entirely and admits against
/// `daily_pax_limit` only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservationSettings {
    pub tenant_id: String,
    pub standard_time_enabled: bool,
    pub standard_duration_minutes: i64,
    pub simple_mode: bool,
    pub daily_pax_limit: i64,
}

/// Settings update payload
///
/// Structural validation only - existing reservations are never re-validated
/// against a settings change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationSettingsUpdate {
    pub standard_time_enabled: bool,
    #[validate(range(min = 1))]
    pub standard_duration_minutes: i64,
    pub simple_mode: bool,
    #[validate(range(min = 0))]
    pub daily_pax_limit: i64,
}
