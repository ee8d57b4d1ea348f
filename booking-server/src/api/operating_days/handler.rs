//! Operating Days API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::TenantId;
use crate::core::ServerState;
use crate::db::models::{OperatingDay, OperatingDayUpdate};
use crate::db::repository::operating_day;
use crate::utils::AppResult;

/// GET /api/operating-days - the 7-row week (seeded on first access)
pub async fn get_week(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
) -> AppResult<Json<Vec<OperatingDay>>> {
    let week = operating_day::get_week(&state.db.pool, &tenant).await?;
    Ok(Json(week))
}

/// PUT /api/operating-days - update one or more weekday rows
pub async fn update_week(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
    Json(payload): Json<Vec<OperatingDayUpdate>>,
) -> AppResult<Json<Vec<OperatingDay>>> {
    for day in &payload {
        day.validate()?;
    }
    let week = operating_day::update_week(&state.db.pool, &tenant, &payload).await?;
    Ok(Json(week))
}
