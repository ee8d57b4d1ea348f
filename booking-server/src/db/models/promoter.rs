//! Promoter Model
//!
//! Referral attribution target. Slugs are unique per tenant; resolution is a
//! secondary analytics concern and never gates a booking.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Promoter {
    pub id: i64,
    pub tenant_id: String,
    pub slug: String,
    pub name: String,
}
