//! Availability API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::TenantId;
use crate::booking::{self, clock};
use crate::core::ServerState;
use crate::db::models::DiningTable;
use crate::db::repository::settings;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// ISO-8601 target instant (UTC)
    pub instant: String,
    #[serde(default)]
    pub utc_offset_minutes: i32,
    pub zone_id: Option<i64>,
    #[serde(default = "default_party_size")]
    pub party_size: i64,
}

fn default_party_size() -> i64 {
    1
}

/// Availability for a target slot
///
/// Table mode lists the free tables (smallest first); simple mode reports
/// the remaining pax headroom for the service day instead.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AvailabilityResponse {
    Table { tables: Vec<DiningTable> },
    Simple { remaining_capacity: i64 },
}

/// GET /api/availability - read-only availability for the booking UI
///
/// A stale snapshot here is fine: the booking transaction re-checks
/// authoritatively before committing.
pub async fn get_availability(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let instant = clock::normalize(&query.instant, query.utc_offset_minutes)?;
    let cfg = settings::get_or_default(&state.db.pool, &tenant).await?;

    let response = if cfg.simple_mode {
        let remaining =
            booking::remaining_capacity(&state.db.pool, &tenant, &instant.service_date()).await?;
        AvailabilityResponse::Simple {
            remaining_capacity: remaining,
        }
    } else {
        let zone_id = query.zone_id.ok_or_else(|| {
            crate::utils::AppError::validation("zone_id is required in table mode")
        })?;
        let tables = booking::list_available(
            &state.db.pool,
            &tenant,
            zone_id,
            &instant,
            query.party_size,
        )
        .await?;
        AvailabilityResponse::Table { tables }
    };
    Ok(Json(response))
}
