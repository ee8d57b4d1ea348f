//! Zone Model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Zone entity - a named seating area ("floor plan") owning tables
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Zone {
    pub id: i64,
    pub tenant_id: String,
    pub name: String,
    pub is_configured: bool,
}

/// Create zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    pub name: String,
}
