//! Booking Transaction
//!
//! The sole write entry point for reservations. The availability re-check
//! and the insert share one `BEGIN IMMEDIATE` transaction, so two
//! concurrent requests for the same table/day serialize at the storage
//! layer and the loser observes the winner's row. Reference data (calendar,
//! settings, promoter slugs) is read before the transaction; the
//! reservation set never is.

use sqlx::SqlitePool;

use super::{BookingError, availability, calendar::OperatingWeek, clock};
use crate::db::WriteTxn;
use crate::db::models::{
    CustomerContact, DiningTable, NewReservation, Reservation, ReservationSettings,
    ReservationStatus,
};
use crate::db::repository::{
    dining_table as table_repo, operating_day, promoter, reservation as reservation_repo, settings,
    zone as zone_repo,
};

/// A booking request as it arrives from the HTTP layer
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub tenant_id: String,
    /// ISO-8601 instant, already encoding the intended UTC instant
    pub instant: String,
    /// Venue UTC offset in minutes, positive west of UTC
    pub utc_offset_minutes: i32,
    pub party_size: i64,
    pub zone_id: Option<i64>,
    /// Specific table wish; ignored in simple mode
    pub table_id: Option<i64>,
    pub customer: CustomerContact,
    pub promoter_slug: Option<String>,
}

/// Create a reservation, or return the typed reason it cannot be accepted
pub async fn create_reservation(
    pool: &SqlitePool,
    req: &BookingRequest,
) -> Result<Reservation, BookingError> {
    availability::validate_party_size(req.party_size)?;
    if req.customer.name.trim().is_empty() {
        return Err(BookingError::Validation(
            "Customer name must not be empty".into(),
        ));
    }
    let instant = clock::normalize(&req.instant, req.utc_offset_minutes)?;

    let week_rows = operating_day::get_week(pool, &req.tenant_id).await?;
    let week = OperatingWeek::from_rows(&week_rows)?;
    if !week.is_open_at(instant.local_weekday(), instant.local_time()) {
        return Err(BookingError::VenueClosed);
    }

    let settings = settings::get_or_default(pool, &req.tenant_id).await?;

    // Attribution never gates booking: unknown slugs, and even a failing
    // lookup, resolve to None.
    let promoter_id = match &req.promoter_slug {
        Some(slug) => match promoter::resolve_slug(pool, &req.tenant_id, slug).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "Promoter slug resolution failed");
                None
            }
        },
        None => None,
    };

    // One bounded retry on lock contention; business rejections are final.
    let mut attempt = 0;
    loop {
        match try_commit(pool, req, &instant, &settings, promoter_id).await {
            Err(e) if e.is_lock_contention() && attempt == 0 => {
                tracing::debug!("Booking transaction hit lock contention, retrying once");
                attempt += 1;
            }
            other => return other,
        }
    }
}

async fn try_commit(
    pool: &SqlitePool,
    req: &BookingRequest,
    instant: &clock::NormalizedInstant,
    settings: &ReservationSettings,
    promoter_id: Option<i64>,
) -> Result<Reservation, BookingError> {
    let mut txn = WriteTxn::begin(pool).await?;
    let admitted = admit_and_insert(&mut txn, req, instant, settings, promoter_id).await;
    let id = match admitted {
        Ok(id) => id,
        Err(e) => {
            let _ = txn.rollback().await;
            return Err(e);
        }
    };
    txn.commit().await?;

    let reservation = reservation_repo::find_by_id(pool, &req.tenant_id, id)
        .await?
        .ok_or_else(|| BookingError::Storage("Reservation missing after commit".into()))?;
    tracing::info!(
        reservation = id,
        tenant = %req.tenant_id,
        table = ?reservation.table_id,
        date = %reservation.service_date,
        pax = req.party_size,
        "Reservation confirmed"
    );
    Ok(reservation)
}

/// Admission check + insert, inside the caller's write transaction
async fn admit_and_insert(
    txn: &mut WriteTxn,
    req: &BookingRequest,
    instant: &clock::NormalizedInstant,
    settings: &ReservationSettings,
    promoter_id: Option<i64>,
) -> Result<i64, BookingError> {
    let service_date = instant.service_date();

    let table_id = if settings.simple_mode {
        let existing =
            reservation_repo::sum_active_pax(txn.conn(), &req.tenant_id, &service_date).await?;
        if !availability::has_capacity(existing, req.party_size, settings.daily_pax_limit) {
            return Err(BookingError::CapacityExceeded);
        }
        None
    } else {
        let table = pick_table(txn, req, instant, settings, &service_date).await?;
        Some(table.id)
    };

    let id = reservation_repo::insert(
        txn.conn(),
        &NewReservation {
            tenant_id: req.tenant_id.clone(),
            table_id,
            start_ms: instant.start_ms(),
            service_date,
            party_size: req.party_size,
            status: ReservationStatus::Confirmed,
            promoter_id,
            customer: req.customer.clone(),
        },
    )
    .await?;
    Ok(id)
}

/// Re-validate the requested table against the live available set, or pick
/// the first available one when none was requested
async fn pick_table(
    txn: &mut WriteTxn,
    req: &BookingRequest,
    instant: &clock::NormalizedInstant,
    settings: &ReservationSettings,
    service_date: &str,
) -> Result<DiningTable, BookingError> {
    let zone_id = match req.table_id {
        Some(table_id) => {
            // Unknown and cross-tenant ids get the same rejection, so the
            // response never distinguishes real ids from fake ones
            let owner = table_repo::owning_tenant(txn.conn(), table_id).await?;
            match owner {
                Some(tenant) if tenant == req.tenant_id => {}
                _ => return Err(BookingError::Unauthorized),
            }
            let table = table_repo::find_by_id(txn.conn(), table_id)
                .await?
                .ok_or(BookingError::Unauthorized)?;
            table.zone_id
        }
        None => match req.zone_id {
            Some(zone_id) => {
                zone_repo::find_by_id(txn.conn(), &req.tenant_id, zone_id)
                    .await?
                    .ok_or(BookingError::Unauthorized)?;
                zone_id
            }
            None => {
                return Err(BookingError::Validation(
                    "zone_id or table_id is required".into(),
                ));
            }
        },
    };

    let candidates = table_repo::find_candidates(txn.conn(), zone_id, req.party_size).await?;
    let candidate_ids: Vec<i64> = candidates.iter().map(|t| t.id).collect();
    let day_reservations =
        reservation_repo::find_active_for_tables(txn.conn(), &candidate_ids, service_date).await?;
    let available = availability::available_tables(
        settings,
        &candidates,
        &day_reservations,
        instant.start_ms(),
        req.party_size,
    );

    match req.table_id {
        Some(table_id) => available
            .into_iter()
            .find(|t| t.id == table_id)
            .ok_or(BookingError::NoAvailability),
        None => available
            .into_iter()
            .next()
            .ok_or(BookingError::NoAvailability),
    }
}

/// Read-only availability for the booking UI
///
/// Runs against a plain pool snapshot; the authoritative re-check happens
/// again inside [`create_reservation`]'s transaction.
pub async fn list_available(
    pool: &SqlitePool,
    tenant_id: &str,
    zone_id: i64,
    instant: &clock::NormalizedInstant,
    party_size: i64,
) -> Result<Vec<DiningTable>, BookingError> {
    availability::validate_party_size(party_size)?;
    zone_repo::find_by_id(pool, tenant_id, zone_id)
        .await?
        .ok_or(BookingError::Unauthorized)?;

    let settings = settings::get_or_default(pool, tenant_id).await?;
    let candidates = table_repo::find_candidates(pool, zone_id, party_size).await?;
    let candidate_ids: Vec<i64> = candidates.iter().map(|t| t.id).collect();
    let day_reservations =
        reservation_repo::find_active_for_tables(pool, &candidate_ids, &instant.service_date())
            .await?;
    Ok(availability::available_tables(
        &settings,
        &candidates,
        &day_reservations,
        instant.start_ms(),
        party_size,
    ))
}

/// Remaining simple-mode headroom for a service day
pub async fn remaining_capacity(
    pool: &SqlitePool,
    tenant_id: &str,
    service_date: &str,
) -> Result<i64, BookingError> {
    let settings = settings::get_or_default(pool, tenant_id).await?;
    let existing = reservation_repo::sum_active_pax(pool, tenant_id, service_date).await?;
    Ok((settings.daily_pax_limit - existing).max(0))
}
