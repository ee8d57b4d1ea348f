//! Zone Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Zone, ZoneCreate};
use sqlx::{SqliteExecutor, SqlitePool};

/// Default layout seeded on first reservation-module access for a tenant
const DEFAULT_ZONE_NAME: &str = "Main Floor";
const DEFAULT_TABLES: &[(&str, i64)] = &[("T1", 2), ("T2", 4), ("T3", 4), ("T4", 6)];

pub async fn find_all(pool: &SqlitePool, tenant_id: &str) -> RepoResult<Vec<Zone>> {
    let zones = sqlx::query_as::<_, Zone>(
        "SELECT id, tenant_id, name, is_configured FROM zone WHERE tenant_id = ? ORDER BY name",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;
    Ok(zones)
}

pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    tenant_id: &str,
    id: i64,
) -> RepoResult<Option<Zone>> {
    let zone = sqlx::query_as::<_, Zone>(
        "SELECT id, tenant_id, name, is_configured FROM zone WHERE id = ? AND tenant_id = ?",
    )
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(ex)
    .await?;
    Ok(zone)
}

pub async fn create(pool: &SqlitePool, tenant_id: &str, data: ZoneCreate) -> RepoResult<Zone> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("Zone name must not be empty".into()));
    }
    let result = sqlx::query("INSERT INTO zone (tenant_id, name) VALUES (?, ?)")
        .bind(tenant_id)
        .bind(data.name.trim())
        .execute(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(format!("Zone '{}' already exists", data.name.trim()))
            }
            other => RepoError::from(other),
        })?;
    find_by_id(pool, tenant_id, result.last_insert_rowid())
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create zone".into()))
}

/// First-access auto-provisioning: a tenant with no zones gets a default
/// zone with a small starter table set, so the booking UI always has a
/// floor to render.
pub async fn ensure_default(pool: &SqlitePool, tenant_id: &str) -> RepoResult<Vec<Zone>> {
    let zones = find_all(pool, tenant_id).await?;
    if !zones.is_empty() {
        return Ok(zones);
    }

    let zone = create(
        pool,
        tenant_id,
        ZoneCreate {
            name: DEFAULT_ZONE_NAME.to_string(),
        },
    )
    .await?;
    for (i, (label, capacity)) in DEFAULT_TABLES.iter().enumerate() {
        sqlx::query(
            "INSERT INTO dining_table (zone_id, label, capacity, shape, x, y, width, height) \
             VALUES (?, ?, ?, 'rect', ?, 0, 80, 80)",
        )
        .bind(zone.id)
        .bind(label)
        .bind(capacity)
        .bind((i as i64) * 100)
        .execute(pool)
        .await?;
    }
    tracing::info!(tenant = %tenant_id, "Provisioned default floor plan");

    find_all(pool, tenant_id).await
}
