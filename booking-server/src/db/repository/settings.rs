//! Reservation Settings Repository (per-tenant singleton)

use super::{RepoError, RepoResult};
use crate::db::models::{ReservationSettings, ReservationSettingsUpdate};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT tenant_id, standard_time_enabled, standard_duration_minutes, \
                      simple_mode, daily_pax_limit FROM reservation_settings WHERE tenant_id = ?";

/// Load the tenant's settings, seeding schema defaults on first access
pub async fn get_or_default(pool: &SqlitePool, tenant_id: &str) -> RepoResult<ReservationSettings> {
    if let Some(settings) = sqlx::query_as::<_, ReservationSettings>(SELECT)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await?
    {
        return Ok(settings);
    }

    sqlx::query("INSERT OR IGNORE INTO reservation_settings (tenant_id) VALUES (?)")
        .bind(tenant_id)
        .execute(pool)
        .await?;
    sqlx::query_as::<_, ReservationSettings>(SELECT)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to seed reservation settings".into()))
}

/// Replace the settings singleton
///
/// Structural validation only; existing reservations are never retroactively
/// re-validated against the new values.
pub async fn update(
    pool: &SqlitePool,
    tenant_id: &str,
    data: ReservationSettingsUpdate,
) -> RepoResult<ReservationSettings> {
    if data.daily_pax_limit < 0 {
        return Err(RepoError::Validation("daily_pax_limit must be >= 0".into()));
    }
    if data.standard_duration_minutes < 1 {
        return Err(RepoError::Validation(
            "standard_duration_minutes must be >= 1".into(),
        ));
    }

    sqlx::query(
        "INSERT INTO reservation_settings \
         (tenant_id, standard_time_enabled, standard_duration_minutes, simple_mode, daily_pax_limit) \
         VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT (tenant_id) DO UPDATE SET \
         standard_time_enabled = excluded.standard_time_enabled, \
         standard_duration_minutes = excluded.standard_duration_minutes, \
         simple_mode = excluded.simple_mode, \
         daily_pax_limit = excluded.daily_pax_limit",
    )
    .bind(tenant_id)
    .bind(data.standard_time_enabled)
    .bind(data.standard_duration_minutes)
    .bind(data.simple_mode)
    .bind(data.daily_pax_limit)
    .execute(pool)
    .await?;

    get_or_default(pool, tenant_id).await
}
