//! End-to-end booking tests against a real SQLite database
//!
//! The concurrency cases drive the public booking transaction with
//! simultaneous requests and assert the admission invariants hold.

use booking_server::DbService;
use booking_server::booking::{self, BookingError, BookingRequest};
use booking_server::db::models::{
    CustomerContact, OperatingDayUpdate, ReservationSettingsUpdate, ReservationStatus, TableShape,
    TableUpsert, ZoneCreate,
};
use booking_server::db::repository::{
    RepoError, dining_table, operating_day, promoter, reservation, settings, zone,
};
use sqlx::SqlitePool;

const TENANT: &str = "demo";

async fn setup() -> (DbService, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("booking.db");
    let db = DbService::new(&path.to_string_lossy()).await.expect("db");
    (db, dir)
}

fn table_settings(duration: i64) -> ReservationSettingsUpdate {
    ReservationSettingsUpdate {
        standard_time_enabled: true,
        standard_duration_minutes: duration,
        simple_mode: false,
        daily_pax_limit: 0,
    }
}

fn simple_settings(pax_limit: i64) -> ReservationSettingsUpdate {
    ReservationSettingsUpdate {
        standard_time_enabled: true,
        standard_duration_minutes: 60,
        simple_mode: true,
        daily_pax_limit: pax_limit,
    }
}

fn upsert(label: &str, capacity: i64) -> TableUpsert {
    TableUpsert {
        id: None,
        label: label.to_string(),
        capacity,
        shape: TableShape::Rect,
        x: 0.0,
        y: 0.0,
        width: 80.0,
        height: 80.0,
        rotation: 0.0,
        points: None,
    }
}

fn contact(name: &str) -> CustomerContact {
    CustomerContact {
        name: name.to_string(),
        phone: None,
        email: None,
    }
}

fn request(instant: &str, party: i64, zone_id: Option<i64>, table_id: Option<i64>) -> BookingRequest {
    BookingRequest {
        tenant_id: TENANT.to_string(),
        instant: instant.to_string(),
        utc_offset_minutes: 0,
        party_size: party,
        zone_id,
        table_id,
        customer: contact("Ana"),
        promoter_slug: None,
    }
}

/// Seed default operating hours (09:00-22:00 every day) and a zone with the
/// given tables; returns (zone_id, table_ids)
async fn seed_floor(pool: &SqlitePool, tables: &[(&str, i64)]) -> (i64, Vec<i64>) {
    operating_day::get_week(pool, TENANT).await.expect("week");
    let zone = zone::create(
        pool,
        TENANT,
        ZoneCreate {
            name: "Patio".into(),
        },
    )
    .await
    .expect("zone");
    let layout: Vec<TableUpsert> = tables.iter().map(|(l, c)| upsert(l, *c)).collect();
    let stored = dining_table::replace_layout(pool, zone.id, layout)
        .await
        .expect("layout");
    let ids = stored.iter().map(|t| t.id).collect();
    (zone.id, ids)
}

// 2025-03-01 is a Saturday, 19:00 UTC with offset 0 falls inside the default
// 09:00-22:00 window.
const SAT_19: &str = "2025-03-01T19:00:00Z";
const SAT_20: &str = "2025-03-01T20:00:00Z";

#[tokio::test]
async fn concurrent_double_booking_admits_exactly_one() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (zone_id, table_ids) = seed_floor(pool, &[("T", 4)]).await;

    let mut a = request(SAT_19, 4, Some(zone_id), Some(table_ids[0]));
    a.customer = contact("Ana");
    let mut b = request(SAT_19, 4, Some(zone_id), Some(table_ids[0]));
    b.customer = contact("Luis");

    let (ra, rb) = tokio::join!(
        booking::create_reservation(pool, &a),
        booking::create_reservation(pool, &b),
    );

    let results = [ra, rb];
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one booking must win the slot");
    let loser = results.iter().find(|r| r.is_err()).unwrap();
    assert_eq!(loser.as_ref().unwrap_err(), &BookingError::NoAvailability);

    let confirmed = results.iter().find(|r| r.is_ok()).unwrap().as_ref().unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);
    assert_eq!(confirmed.table_id, Some(table_ids[0]));
}

#[tokio::test]
async fn back_to_back_slots_on_one_table_both_succeed() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (zone_id, table_ids) = seed_floor(pool, &[("T", 4)]).await;

    booking::create_reservation(pool, &request(SAT_19, 2, Some(zone_id), Some(table_ids[0])))
        .await
        .expect("19:00 booking");
    booking::create_reservation(pool, &request(SAT_20, 2, Some(zone_id), Some(table_ids[0])))
        .await
        .expect("20:00 back-to-back booking");
}

#[tokio::test]
async fn overlapping_slot_is_rejected_and_freed_by_cancellation() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (zone_id, table_ids) = seed_floor(pool, &[("T", 4)]).await;

    let first = booking::create_reservation(
        pool,
        &request(SAT_19, 2, Some(zone_id), Some(table_ids[0])),
    )
    .await
    .expect("first booking");

    let second = booking::create_reservation(
        pool,
        &request(SAT_19, 2, Some(zone_id), Some(table_ids[0])),
    )
    .await;
    assert_eq!(second.unwrap_err(), BookingError::NoAvailability);

    // Cancelling the holder frees the slot again
    reservation::update_status(pool, TENANT, first.id, ReservationStatus::Cancelled)
        .await
        .expect("cancel");
    booking::create_reservation(pool, &request(SAT_19, 2, Some(zone_id), Some(table_ids[0])))
        .await
        .expect("rebooking the freed slot");
}

#[tokio::test]
async fn cancelled_reservation_cannot_be_reinstated_onto_a_rebooked_slot() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (zone_id, table_ids) = seed_floor(pool, &[("T", 4)]).await;

    let first = booking::create_reservation(
        pool,
        &request(SAT_19, 2, Some(zone_id), Some(table_ids[0])),
    )
    .await
    .unwrap();
    reservation::update_status(pool, TENANT, first.id, ReservationStatus::Cancelled)
        .await
        .unwrap();
    booking::create_reservation(pool, &request(SAT_19, 2, Some(zone_id), Some(table_ids[0])))
        .await
        .expect("freed slot rebooked");

    // Flipping the cancelled row back to CONFIRMED would double-book the
    // table; the transition is rejected outright
    let reinstate =
        reservation::update_status(pool, TENANT, first.id, ReservationStatus::Confirmed).await;
    assert!(matches!(reinstate, Err(RepoError::Validation(_))));

    let day = reservation::list_by_day(pool, TENANT, "2025-03-01").await.unwrap();
    let holding: Vec<_> = day.iter().filter(|r| r.status.occupies()).collect();
    assert_eq!(holding.len(), 1, "exactly one reservation may hold the slot");
}

#[tokio::test]
async fn whole_day_blocking_when_slotting_disabled() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(
        pool,
        TENANT,
        ReservationSettingsUpdate {
            standard_time_enabled: false,
            standard_duration_minutes: 60,
            simple_mode: false,
            daily_pax_limit: 0,
        },
    )
    .await
    .unwrap();
    let (zone_id, table_ids) = seed_floor(pool, &[("T", 4)]).await;

    booking::create_reservation(pool, &request("2025-03-01T12:00:00Z", 2, Some(zone_id), Some(table_ids[0])))
        .await
        .expect("first booking of the day");
    let evening = booking::create_reservation(
        pool,
        &request(SAT_20, 2, Some(zone_id), Some(table_ids[0])),
    )
    .await;
    assert_eq!(evening.unwrap_err(), BookingError::NoAvailability);
}

#[tokio::test]
async fn picks_smallest_sufficient_table_when_none_requested() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (zone_id, table_ids) = seed_floor(pool, &[("Big", 8), ("Small", 2), ("Mid", 4)]).await;

    let booked = booking::create_reservation(pool, &request(SAT_19, 2, Some(zone_id), None))
        .await
        .expect("booking");
    // replace_layout returns tables ordered by label: Big, Mid, Small
    let small_id = table_ids[2];
    assert_eq!(booked.table_id, Some(small_id));
}

#[tokio::test]
async fn simple_mode_enforces_daily_pax_cap() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, simple_settings(10)).await.unwrap();
    operating_day::get_week(pool, TENANT).await.unwrap();

    let six = booking::create_reservation(pool, &request(SAT_19, 6, None, None))
        .await
        .expect("6 of 10");
    assert_eq!(six.table_id, None, "simple mode never assigns a table");

    let five = booking::create_reservation(pool, &request(SAT_19, 5, None, None)).await;
    assert_eq!(five.unwrap_err(), BookingError::CapacityExceeded);

    booking::create_reservation(pool, &request(SAT_19, 4, None, None))
        .await
        .expect("4 fills the cap exactly");

    assert_eq!(
        booking::remaining_capacity(pool, TENANT, "2025-03-01").await.unwrap(),
        0
    );
}

#[tokio::test]
async fn concurrent_simple_mode_respects_the_cap() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, simple_settings(10)).await.unwrap();
    operating_day::get_week(pool, TENANT).await.unwrap();

    // Two parties of 6 against a cap of 10: at most one can be admitted
    let a = request(SAT_19, 6, None, None);
    let b = request(SAT_19, 6, None, None);
    let (ra, rb) = tokio::join!(
        booking::create_reservation(pool, &a),
        booking::create_reservation(pool, &b),
    );

    let results = [ra, rb];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = results.iter().find(|r| r.is_err()).unwrap();
    assert_eq!(loser.as_ref().unwrap_err(), &BookingError::CapacityExceeded);
}

#[tokio::test]
async fn simple_mode_no_show_releases_pax() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, simple_settings(10)).await.unwrap();
    operating_day::get_week(pool, TENANT).await.unwrap();

    let first = booking::create_reservation(pool, &request(SAT_19, 8, None, None))
        .await
        .unwrap();
    let blocked = booking::create_reservation(pool, &request(SAT_19, 6, None, None)).await;
    assert_eq!(blocked.unwrap_err(), BookingError::CapacityExceeded);

    reservation::update_status(pool, TENANT, first.id, ReservationStatus::NoShow)
        .await
        .unwrap();
    booking::create_reservation(pool, &request(SAT_19, 6, None, None))
        .await
        .expect("pax freed by no-show");
}

#[tokio::test]
async fn closed_weekday_rejects_bookings() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (zone_id, _) = seed_floor(pool, &[("T", 4)]).await;

    // Close Saturday (weekday 5)
    operating_day::update_week(
        pool,
        TENANT,
        &[OperatingDayUpdate {
            weekday: 5,
            is_open: false,
            open_time: "09:00".into(),
            close_time: "22:00".into(),
        }],
    )
    .await
    .unwrap();

    let result = booking::create_reservation(pool, &request(SAT_19, 2, Some(zone_id), None)).await;
    assert_eq!(result.unwrap_err(), BookingError::VenueClosed);
}

#[tokio::test]
async fn overnight_window_admits_past_midnight() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (zone_id, _) = seed_floor(pool, &[("T", 4)]).await;

    // Friday 20:00-02:00, Saturday closed
    operating_day::update_week(
        pool,
        TENANT,
        &[
            OperatingDayUpdate {
                weekday: 4,
                is_open: true,
                open_time: "20:00".into(),
                close_time: "02:00".into(),
            },
            OperatingDayUpdate {
                weekday: 5,
                is_open: false,
                open_time: "09:00".into(),
                close_time: "22:00".into(),
            },
        ],
    )
    .await
    .unwrap();

    // 2025-03-08 is the Saturday after Friday 2025-03-07: 01:30 falls inside
    // Friday's spill-over
    booking::create_reservation(
        pool,
        &request("2025-03-08T01:30:00Z", 2, Some(zone_id), None),
    )
    .await
    .expect("01:30 during overnight service");

    // Friday mid-morning is closed
    let morning = booking::create_reservation(
        pool,
        &request("2025-03-07T10:00:00Z", 2, Some(zone_id), None),
    )
    .await;
    assert_eq!(morning.unwrap_err(), BookingError::VenueClosed);
}

#[tokio::test]
async fn promoter_slug_attribution() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (zone_id, _) = seed_floor(pool, &[("T", 4)]).await;
    let maria = promoter::create(pool, TENANT, "maria", "Maria").await.unwrap();

    let mut with_slug = request(SAT_19, 2, Some(zone_id), None);
    with_slug.promoter_slug = Some("maria".into());
    let booked = booking::create_reservation(pool, &with_slug).await.unwrap();
    assert_eq!(booked.promoter_id, Some(maria.id));

    // Unknown slug is silently ignored, never a hard error
    let mut unknown = request(SAT_20, 2, Some(zone_id), None);
    unknown.promoter_slug = Some("ghost".into());
    let booked = booking::create_reservation(pool, &unknown).await.unwrap();
    assert_eq!(booked.promoter_id, None);
}

#[tokio::test]
async fn cross_tenant_table_is_unauthorized() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (_, table_ids) = seed_floor(pool, &[("T", 4)]).await;

    settings::update(pool, "other", table_settings(60)).await.unwrap();
    operating_day::get_week(pool, "other").await.unwrap();

    let mut req = request(SAT_19, 2, None, Some(table_ids[0]));
    req.tenant_id = "other".into();
    let result = booking::create_reservation(pool, &req).await;
    assert_eq!(result.unwrap_err(), BookingError::Unauthorized);

    // A table id that exists for nobody draws the same rejection, so the
    // response never reveals whether an id is real
    let ghost = booking::create_reservation(pool, &request(SAT_19, 2, None, Some(9999))).await;
    assert_eq!(ghost.unwrap_err(), BookingError::Unauthorized);
}

#[tokio::test]
async fn invalid_inputs_are_rejected_before_any_write() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    settings::update(pool, TENANT, table_settings(60)).await.unwrap();
    let (zone_id, _) = seed_floor(pool, &[("T", 4)]).await;

    let zero = booking::create_reservation(pool, &request(SAT_19, 0, Some(zone_id), None)).await;
    assert_eq!(zero.unwrap_err(), BookingError::InvalidPartySize);

    let garbage =
        booking::create_reservation(pool, &request("whenever", 2, Some(zone_id), None)).await;
    assert!(matches!(
        garbage.unwrap_err(),
        BookingError::InvalidInstant(_)
    ));

    assert!(reservation::list_by_day(pool, TENANT, "2025-03-01")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn layout_replace_diffs_against_stored_tables() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;
    operating_day::get_week(pool, TENANT).await.unwrap();
    let (zone_id, table_ids) = seed_floor(pool, &[("A", 2), ("B", 4)]).await;

    // Keep A (resized), drop B, add C
    let mut keep_a = upsert("A", 6);
    keep_a.id = Some(table_ids[0]);
    let stored = dining_table::replace_layout(pool, zone_id, vec![keep_a, upsert("C", 2)])
        .await
        .unwrap();

    let labels: Vec<&str> = stored.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "C"]);
    assert_eq!(stored[0].id, table_ids[0]);
    assert_eq!(stored[0].capacity, 6);

    let zones = zone::find_all(pool, TENANT).await.unwrap();
    let patio = zones.iter().find(|z| z.name == "Patio").unwrap();
    assert!(patio.is_configured);
}

#[tokio::test]
async fn first_access_provisions_default_floor() {
    let (db, _dir) = setup().await;
    let pool = &db.pool;

    let zones = zone::ensure_default(pool, TENANT).await.unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].name, "Main Floor");
    assert!(!zones[0].is_configured);

    let tables = dining_table::find_by_zone(pool, zones[0].id).await.unwrap();
    assert_eq!(tables.len(), 4);
    assert!(tables.iter().all(|t| t.capacity >= 1));

    // Second access is a no-op
    let again = zone::ensure_default(pool, TENANT).await.unwrap();
    assert_eq!(again.len(), 1);
}
