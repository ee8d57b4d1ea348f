//! Promoter Repository

use super::RepoResult;
use crate::db::models::Promoter;
use sqlx::SqlitePool;

/// Resolve a referral slug to a promoter id, scoped to the tenant
///
/// Unknown or cross-tenant slugs resolve to `None`; attribution is an
/// analytics concern and never fails a booking.
pub async fn resolve_slug(
    pool: &SqlitePool,
    tenant_id: &str,
    slug: &str,
) -> RepoResult<Option<i64>> {
    let id: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM promoter WHERE tenant_id = ? AND slug = ?")
            .bind(tenant_id)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
    Ok(id.map(|(id,)| id))
}

pub async fn create(
    pool: &SqlitePool,
    tenant_id: &str,
    slug: &str,
    name: &str,
) -> RepoResult<Promoter> {
    sqlx::query("INSERT INTO promoter (tenant_id, slug, name) VALUES (?, ?, ?)")
        .bind(tenant_id)
        .bind(slug)
        .bind(name)
        .execute(pool)
        .await?;
    let promoter = sqlx::query_as::<_, Promoter>(
        "SELECT id, tenant_id, slug, name FROM promoter WHERE tenant_id = ? AND slug = ?",
    )
    .bind(tenant_id)
    .bind(slug)
    .fetch_one(pool)
    .await?;
    Ok(promoter)
}
