//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::TenantId;
use crate::booking::{self, BookingRequest};
use crate::core::ServerState;
use crate::db::models::{CustomerContact, Reservation, ReservationStatus};
use crate::db::repository::reservation;
use crate::utils::{AppError, AppResult, time};

/// Booking payload
///
/// `tenant_id` in the body is honored only when no authenticated tenant
/// header is present (public booking links).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationPayload {
    pub tenant_id: Option<String>,
    pub instant: String,
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[validate(range(min = 1))]
    pub party_size: i64,
    pub zone_id: Option<i64>,
    pub table_id: Option<i64>,
    #[validate(length(min = 1, max = 128))]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    pub promoter_slug: Option<String>,
}

/// POST /api/reservations - the sole booking write entry point
pub async fn create(
    State(state): State<ServerState>,
    tenant: Option<TenantId>,
    Json(payload): Json<CreateReservationPayload>,
) -> AppResult<Json<Reservation>> {
    payload.validate()?;
    let tenant_id = match tenant {
        Some(TenantId(id)) => id,
        None => payload.tenant_id.clone().ok_or(AppError::Unauthorized)?,
    };

    let request = BookingRequest {
        tenant_id,
        instant: payload.instant,
        utc_offset_minutes: payload.utc_offset_minutes,
        party_size: payload.party_size,
        zone_id: payload.zone_id,
        table_id: payload.table_id,
        customer: CustomerContact {
            name: payload.customer_name,
            phone: payload.customer_phone,
            email: payload.customer_email,
        },
        promoter_slug: payload.promoter_slug,
    };

    let reservation = booking::create_reservation(&state.db.pool, &request).await?;
    Ok(Json(reservation))
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// Local service date, YYYY-MM-DD
    pub date: String,
}

/// GET /api/reservations?date=YYYY-MM-DD - staff day view
pub async fn list_by_day(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let date = time::parse_date(&query.date)?;
    let reservations =
        reservation::list_by_day(&state.db.pool, &tenant, &time::format_date(date)).await?;
    Ok(Json(reservations))
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: ReservationStatus,
}

/// PUT /api/reservations/{id}/status - staff status transition
///
/// CANCELLED and NO_SHOW free the slot / pax headroom immediately.
pub async fn update_status(
    State(state): State<ServerState>,
    TenantId(tenant): TenantId,
    Path(id): Path<i64>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<Reservation>> {
    let updated = reservation::update_status(&state.db.pool, &tenant, id, payload.status).await?;
    Ok(Json(updated))
}
