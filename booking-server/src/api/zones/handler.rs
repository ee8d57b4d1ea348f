//! Zone API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::TenantId;
use crate::core::ServerState;
use crate::db::models::{DiningTable, TableUpsert, Zone, ZoneCreate};
use crate::db::repository::{dining_table, zone};
use crate::utils::{AppError, AppResult};

/// GET /api/zones - list zones, auto-provisioning a default floor plan on
/// first access
pub async fn list(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
) -> AppResult<Json<Vec<Zone>>> {
    let zones = zone::ensure_default(&state.db.pool, &tenant).await?;
    Ok(Json(zones))
}

/// POST /api/zones - create a zone
pub async fn create(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
    Json(payload): Json<ZoneCreate>,
) -> AppResult<Json<Zone>> {
    let zone = zone::create(&state.db.pool, &tenant, payload).await?;
    Ok(Json(zone))
}

/// GET /api/zones/{id}/tables - tables of a zone
pub async fn list_tables(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<DiningTable>>> {
    require_zone(&state, &tenant, id).await?;
    let tables = dining_table::find_by_zone(&state.db.pool, id).await?;
    Ok(Json(tables))
}

/// PUT /api/zones/{id}/layout - wholesale layout replace
///
/// Diffs the incoming table list against the stored one: removed ids are
/// deleted, the rest upserted.
pub async fn replace_layout(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
    Path(id): Path<i64>,
    Json(payload): Json<Vec<TableUpsert>>,
) -> AppResult<Json<Vec<DiningTable>>> {
    for table in &payload {
        table.validate()?;
    }
    require_zone(&state, &tenant, id).await?;
    let tables = dining_table::replace_layout(&state.db.pool, id, payload).await?;
    Ok(Json(tables))
}

async fn require_zone(state: &ServerState, tenant: &str, id: i64) -> AppResult<()> {
    zone::find_by_id(&state.db.pool, tenant, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Zone {id} not found")))?;
    Ok(())
}
