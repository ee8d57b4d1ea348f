//! Operating Day Model
//!
//! One row per weekday (7 fixed rows per tenant), weekday 0 = Monday.
//! `close_time < open_time` means the window crosses midnight.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OperatingDay {
    pub tenant_id: String,
    pub weekday: i64,
    pub is_open: bool,
    pub open_time: String,
    pub close_time: String,
}

/// Update payload for a single weekday row
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OperatingDayUpdate {
    #[validate(range(min = 0, max = 6))]
    pub weekday: i64,
    pub is_open: bool,
    pub open_time: String,
    pub close_time: String,
}
