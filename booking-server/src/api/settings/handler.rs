//! Reservation Settings API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::TenantId;
use crate::core::ServerState;
use crate::db::models::{ReservationSettings, ReservationSettingsUpdate};
use crate::db::repository::settings;
use crate::utils::AppResult;

/// GET /api/settings - the tenant's reservation settings (seeded on first
/// access)
pub async fn get_settings(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
) -> AppResult<Json<ReservationSettings>> {
    let cfg = settings::get_or_default(&state.db.pool, &tenant).await?;
    Ok(Json(cfg))
}

/// PUT /api/settings - replace the settings singleton
///
/// Structurally validated; existing reservations are never retroactively
/// invalidated by a settings change.
pub async fn update_settings(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
    Json(payload): Json<ReservationSettingsUpdate>,
) -> AppResult<Json<ReservationSettings>> {
    payload.validate()?;
    let cfg = settings::update(&state.db.pool, &tenant, payload).await?;
    Ok(Json(cfg))
}
