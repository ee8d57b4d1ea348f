//! Reservation Repository
//!
//! Day-scoped reads run on the caller's executor so the booking transaction
//! can re-read the reservation set inside the same write transaction that
//! performs the insert.

use super::{RepoError, RepoResult};
use crate::db::models::{NewReservation, Reservation, ReservationStatus};
use crate::utils::time::now_millis;
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, tenant_id, table_id, start_ms, service_date, party_size, \
                      status, promoter_id, customer_name, customer_phone, customer_email, \
                      created_at_ms FROM reservation";

/// Active (capacity-holding) reservations on any of the given tables for a
/// service date
pub async fn find_active_for_tables(
    ex: impl SqliteExecutor<'_>,
    table_ids: &[i64],
    service_date: &str,
) -> RepoResult<Vec<Reservation>> {
    if table_ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; table_ids.len()].join(", ");
    let sql = format!(
        "{SELECT} WHERE table_id IN ({placeholders}) AND service_date = ? \
         AND status NOT IN ('CANCELLED', 'NO_SHOW')"
    );
    let mut query = sqlx::query_as::<_, Reservation>(&sql);
    for id in table_ids {
        query = query.bind(id);
    }
    let reservations = query.bind(service_date).fetch_all(ex).await?;
    Ok(reservations)
}

/// Sum of party sizes over active reservations for a tenant-day (simple mode)
pub async fn sum_active_pax(
    ex: impl SqliteExecutor<'_>,
    tenant_id: &str,
    service_date: &str,
) -> RepoResult<i64> {
    let (sum,): (i64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(party_size), 0) FROM reservation \
         WHERE tenant_id = ? AND service_date = ? \
         AND status NOT IN ('CANCELLED', 'NO_SHOW')",
    )
    .bind(tenant_id)
    .bind(service_date)
    .fetch_one(ex)
    .await?;
    Ok(sum)
}

/// Insert a reservation row; runs on the booking transaction's connection
pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    data: &NewReservation,
) -> RepoResult<i64> {
    let result = sqlx::query(
        "INSERT INTO reservation \
         (tenant_id, table_id, start_ms, service_date, party_size, status, promoter_id, \
          customer_name, customer_phone, customer_email, created_at_ms) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.tenant_id)
    .bind(data.table_id)
    .bind(data.start_ms)
    .bind(&data.service_date)
    .bind(data.party_size)
    .bind(data.status)
    .bind(data.promoter_id)
    .bind(&data.customer.name)
    .bind(&data.customer.phone)
    .bind(&data.customer.email)
    .bind(now_millis())
    .execute(ex)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    tenant_id: &str,
    id: i64,
) -> RepoResult<Option<Reservation>> {
    let reservation =
        sqlx::query_as::<_, Reservation>(&format!("{SELECT} WHERE id = ? AND tenant_id = ?"))
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(ex)
            .await?;
    Ok(reservation)
}

/// Day listing for the staff view, earliest start first
pub async fn list_by_day(
    pool: &SqlitePool,
    tenant_id: &str,
    service_date: &str,
) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "{SELECT} WHERE tenant_id = ? AND service_date = ? ORDER BY start_ms, id"
    ))
    .bind(tenant_id)
    .bind(service_date)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

/// Staff status transition (seat / no-show / cancel)
///
/// Terminal states free the table slot or pax headroom immediately; the
/// availability queries exclude them by status. PENDING and CONFIRMED are
/// not reachable here: reinstating a cancelled reservation would put it
/// back on the table without the availability check that admitted it.
pub async fn update_status(
    pool: &SqlitePool,
    tenant_id: &str,
    id: i64,
    status: ReservationStatus,
) -> RepoResult<Reservation> {
    if !matches!(
        status,
        ReservationStatus::Seated | ReservationStatus::NoShow | ReservationStatus::Cancelled
    ) {
        return Err(RepoError::Validation(format!(
            "Status {status:?} is not a staff transition; book again instead"
        )));
    }
    let rows = sqlx::query("UPDATE reservation SET status = ? WHERE id = ? AND tenant_id = ?")
        .bind(status)
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    find_by_id(pool, tenant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}
