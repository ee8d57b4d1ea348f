//! Operating Day Repository
//!
//! The weekday set is fixed: exactly 7 rows per tenant, seeded on first
//! access and only ever updated in place.

use super::{RepoError, RepoResult};
use crate::db::models::{OperatingDay, OperatingDayUpdate};
use sqlx::SqlitePool;

/// Load the tenant's week, seeding default hours (open 09:00-22:00 every
/// day) when the tenant has no rows yet.
pub async fn get_week(pool: &SqlitePool, tenant_id: &str) -> RepoResult<Vec<OperatingDay>> {
    let rows = fetch_week(pool, tenant_id).await?;
    if !rows.is_empty() {
        return Ok(rows);
    }

    for weekday in 0..7i64 {
        sqlx::query(
            "INSERT OR IGNORE INTO operating_day (tenant_id, weekday) VALUES (?, ?)",
        )
        .bind(tenant_id)
        .bind(weekday)
        .execute(pool)
        .await?;
    }
    fetch_week(pool, tenant_id).await
}

async fn fetch_week(pool: &SqlitePool, tenant_id: &str) -> RepoResult<Vec<OperatingDay>> {
    let rows = sqlx::query_as::<_, OperatingDay>(
        "SELECT tenant_id, weekday, is_open, open_time, close_time \
         FROM operating_day WHERE tenant_id = ? ORDER BY weekday",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Update one or more weekday rows; times must parse as HH:MM
pub async fn update_week(
    pool: &SqlitePool,
    tenant_id: &str,
    updates: &[OperatingDayUpdate],
) -> RepoResult<Vec<OperatingDay>> {
    for u in updates {
        if !(0..7).contains(&u.weekday) {
            return Err(RepoError::Validation(format!(
                "Weekday {} out of range",
                u.weekday
            )));
        }
        for t in [&u.open_time, &u.close_time] {
            if chrono::NaiveTime::parse_from_str(t, "%H:%M").is_err() {
                return Err(RepoError::Validation(format!("Invalid time: {t}")));
            }
        }
    }

    // Seed first so a partial update still leaves 7 rows
    get_week(pool, tenant_id).await?;

    for u in updates {
        sqlx::query(
            "UPDATE operating_day SET is_open = ?, open_time = ?, close_time = ? \
             WHERE tenant_id = ? AND weekday = ?",
        )
        .bind(u.is_open)
        .bind(&u.open_time)
        .bind(&u.close_time)
        .bind(tenant_id)
        .bind(u.weekday)
        .execute(pool)
        .await?;
    }

    fetch_week(pool, tenant_id).await
}
