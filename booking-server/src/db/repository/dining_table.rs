//! Dining Table Repository

use super::{RepoError, RepoResult};
use crate::db::WriteTxn;
use crate::db::models::{DiningTable, TableUpsert};
use sqlx::{SqliteExecutor, SqlitePool};
use std::collections::HashSet;

const SELECT: &str = "SELECT id, zone_id, label, capacity, shape, x, y, width, height, rotation, \
                      points_json FROM dining_table";

pub async fn find_by_zone(pool: &SqlitePool, zone_id: i64) -> RepoResult<Vec<DiningTable>> {
    let tables =
        sqlx::query_as::<_, DiningTable>(&format!("{SELECT} WHERE zone_id = ? ORDER BY label"))
            .bind(zone_id)
            .fetch_all(pool)
            .await?;
    Ok(tables)
}

pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(table)
}

/// Tables of a zone that can seat the party, smallest first
///
/// Runs on the caller's executor so the booking transaction can re-read the
/// candidate set inside its own write transaction.
pub async fn find_candidates(
    ex: impl SqliteExecutor<'_>,
    zone_id: i64,
    party_size: i64,
) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "{SELECT} WHERE zone_id = ? AND capacity >= ? ORDER BY capacity, id"
    ))
    .bind(zone_id)
    .bind(party_size)
    .fetch_all(ex)
    .await?;
    Ok(tables)
}

/// The tenant owning a table's zone, for cross-tenant request rejection
pub async fn owning_tenant(ex: impl SqliteExecutor<'_>, table_id: i64) -> RepoResult<Option<String>> {
    let tenant: Option<(String,)> = sqlx::query_as(
        "SELECT z.tenant_id FROM dining_table t JOIN zone z ON z.id = t.zone_id WHERE t.id = ?",
    )
    .bind(table_id)
    .fetch_optional(ex)
    .await?;
    Ok(tenant.map(|(t,)| t))
}

/// Wholesale layout replace for a zone
///
/// Diffs the incoming list against the stored one: rows whose id disappeared
/// are deleted, present ids are updated, entries without an id are inserted.
/// The whole diff runs in one write transaction and marks the zone
/// configured.
pub async fn replace_layout(
    pool: &SqlitePool,
    zone_id: i64,
    tables: Vec<TableUpsert>,
) -> RepoResult<Vec<DiningTable>> {
    for t in &tables {
        if t.capacity < 1 {
            return Err(RepoError::Validation(format!(
                "Table '{}' capacity must be >= 1",
                t.label
            )));
        }
    }

    let mut txn = WriteTxn::begin(pool).await?;
    let result = apply_layout(&mut txn, zone_id, &tables).await;
    match result {
        Ok(()) => txn.commit().await?,
        Err(e) => {
            let _ = txn.rollback().await;
            return Err(e);
        }
    }

    find_by_zone(pool, zone_id).await
}

async fn apply_layout(txn: &mut WriteTxn, zone_id: i64, tables: &[TableUpsert]) -> RepoResult<()> {
    let existing: Vec<(i64,)> = sqlx::query_as("SELECT id FROM dining_table WHERE zone_id = ?")
        .bind(zone_id)
        .fetch_all(txn.conn())
        .await?;
    let existing: HashSet<i64> = existing.into_iter().map(|(id,)| id).collect();
    let incoming: HashSet<i64> = tables.iter().filter_map(|t| t.id).collect();

    if let Some(unknown) = incoming.iter().find(|id| !existing.contains(id)) {
        return Err(RepoError::Validation(format!(
            "Table {unknown} does not belong to zone {zone_id}"
        )));
    }

    // Delete rows that disappeared from the layout
    for id in existing.difference(&incoming) {
        sqlx::query("DELETE FROM dining_table WHERE id = ? AND zone_id = ?")
            .bind(id)
            .bind(zone_id)
            .execute(txn.conn())
            .await?;
    }

    // Upsert the rest
    for t in tables {
        let points_json = match &t.points {
            Some(points) => Some(
                serde_json::to_string(points)
                    .map_err(|e| RepoError::Validation(format!("Invalid points: {e}")))?,
            ),
            None => None,
        };
        match t.id {
            Some(id) => {
                sqlx::query(
                    "UPDATE dining_table SET label = ?, capacity = ?, shape = ?, x = ?, y = ?, \
                     width = ?, height = ?, rotation = ?, points_json = ? \
                     WHERE id = ? AND zone_id = ?",
                )
                .bind(&t.label)
                .bind(t.capacity)
                .bind(t.shape)
                .bind(t.x)
                .bind(t.y)
                .bind(t.width)
                .bind(t.height)
                .bind(t.rotation)
                .bind(&points_json)
                .bind(id)
                .bind(zone_id)
                .execute(txn.conn())
                .await?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO dining_table \
                     (zone_id, label, capacity, shape, x, y, width, height, rotation, points_json) \
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(zone_id)
                .bind(&t.label)
                .bind(t.capacity)
                .bind(t.shape)
                .bind(t.x)
                .bind(t.y)
                .bind(t.width)
                .bind(t.height)
                .bind(t.rotation)
                .bind(&points_json)
                .execute(txn.conn())
                .await?;
            }
        }
    }

    sqlx::query("UPDATE zone SET is_configured = 1 WHERE id = ?")
        .bind(zone_id)
        .execute(txn.conn())
        .await?;

    Ok(())
}
