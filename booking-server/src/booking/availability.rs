//! Availability Engine
//!
//! Pure over rows the repositories load; the booking transaction re-runs
//! these checks inside its write transaction, the read-only availability
//! endpoint runs them against a plain pool snapshot.

use crate::db::models::{DiningTable, Reservation, ReservationSettings};

const MINUTE_MS: i64 = 60_000;

/// Half-open interval on the canonical millis timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Interval {
    /// Half-open overlap: touching boundaries are not overlaps, so
    /// back-to-back bookings are allowed when slotting is enabled.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }
}

pub fn validate_party_size(party_size: i64) -> Result<(), super::BookingError> {
    if party_size < 1 {
        return Err(super::BookingError::InvalidPartySize);
    }
    Ok(())
}

/// Tables of the zone free for the requested slot, smallest sufficient
/// capacity first
///
/// The capacity-ascending order biases seating efficiency; it is a policy
/// choice, not a correctness requirement.
///
/// With slotting enabled every active reservation occupies
/// `[start, start + standard_duration)`; with it disabled a single active
/// reservation blocks its table for the entire service day. `reservations`
/// must already be scoped to the same service day.
pub fn available_tables(
    settings: &ReservationSettings,
    tables: &[DiningTable],
    reservations: &[Reservation],
    target_ms: i64,
    party_size: i64,
) -> Vec<DiningTable> {
    let duration_ms = settings.standard_duration_minutes * MINUTE_MS;
    let requested = Interval {
        start_ms: target_ms,
        end_ms: target_ms + duration_ms,
    };

    let mut available: Vec<DiningTable> = tables
        .iter()
        .filter(|table| table.capacity >= party_size)
        .filter(|table| {
            reservations
                .iter()
                .filter(|r| r.status.occupies() && r.table_id == Some(table.id))
                .all(|r| {
                    if !settings.standard_time_enabled {
                        // Whole-day blocking: any active reservation occupies
                        // the table for the service day
                        return false;
                    }
                    let occupied = Interval {
                        start_ms: r.start_ms,
                        end_ms: r.start_ms + duration_ms,
                    };
                    !requested.overlaps(&occupied)
                })
        })
        .cloned()
        .collect();

    available.sort_by_key(|t| (t.capacity, t.id));
    available
}

/// Simple-mode admission: committed pax for the day plus the new party must
/// stay within the cap. A cap of 0 is a valid "closed to simple bookings"
/// configuration.
pub fn has_capacity(existing_pax: i64, party_size: i64, daily_pax_limit: i64) -> bool {
    existing_pax + party_size <= daily_pax_limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{ReservationStatus, TableShape};

    fn settings(slotting: bool, duration: i64) -> ReservationSettings {
        ReservationSettings {
            tenant_id: "demo".into(),
            standard_time_enabled: slotting,
            standard_duration_minutes: duration,
            simple_mode: false,
            daily_pax_limit: 0,
        }
    }

    fn table(id: i64, capacity: i64) -> DiningTable {
        DiningTable {
            id,
            zone_id: 1,
            label: format!("T{id}"),
            capacity,
            shape: TableShape::Rect,
            x: 0.0,
            y: 0.0,
            width: 80.0,
            height: 80.0,
            rotation: 0.0,
            points_json: None,
        }
    }

    fn reservation(table_id: i64, start_ms: i64, status: ReservationStatus) -> Reservation {
        Reservation {
            id: 0,
            tenant_id: "demo".into(),
            table_id: Some(table_id),
            start_ms,
            service_date: "2025-03-01".into(),
            party_size: 2,
            status,
            promoter_id: None,
            customer_name: "Ana".into(),
            customer_phone: None,
            customer_email: None,
            created_at_ms: 0,
        }
    }

    const HOUR: i64 = 3_600_000;

    #[test]
    fn overlap_rule_is_half_open() {
        let a = Interval { start_ms: 0, end_ms: HOUR };
        let b = Interval { start_ms: HOUR, end_ms: 2 * HOUR };
        let c = Interval { start_ms: HOUR - 1, end_ms: 2 * HOUR };
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn back_to_back_is_allowed_with_slotting() {
        let s = settings(true, 60);
        let tables = [table(1, 4)];
        let booked_19 = [reservation(1, 19 * HOUR, ReservationStatus::Confirmed)];
        // 20:00 on the same table succeeds: boundary touch is not overlap
        let free = available_tables(&s, &tables, &booked_19, 20 * HOUR, 2);
        assert_eq!(free.len(), 1);
        // 19:30 overlaps
        let busy = available_tables(&s, &tables, &booked_19, 19 * HOUR + HOUR / 2, 2);
        assert!(busy.is_empty());
    }

    #[test]
    fn whole_day_blocking_without_slotting() {
        let s = settings(false, 60);
        let tables = [table(1, 4)];
        let booked = [reservation(1, 12 * HOUR, ReservationStatus::Confirmed)];
        // Any other time that day is blocked
        assert!(available_tables(&s, &tables, &booked, 20 * HOUR, 2).is_empty());
        assert!(available_tables(&s, &tables, &[], 20 * HOUR, 2).len() == 1);
    }

    #[test]
    fn cancelled_and_no_show_free_the_table() {
        let s = settings(true, 60);
        let tables = [table(1, 4)];
        for status in [ReservationStatus::Cancelled, ReservationStatus::NoShow] {
            let rows = [reservation(1, 19 * HOUR, status)];
            assert_eq!(available_tables(&s, &tables, &rows, 19 * HOUR, 2).len(), 1);
        }
    }

    #[test]
    fn smallest_sufficient_table_first() {
        let s = settings(true, 60);
        let tables = [table(1, 8), table(2, 2), table(3, 4)];
        let free = available_tables(&s, &tables, &[], 19 * HOUR, 2);
        let capacities: Vec<i64> = free.iter().map(|t| t.capacity).collect();
        assert_eq!(capacities, vec![2, 4, 8]);
    }

    #[test]
    fn undersized_tables_are_filtered_not_an_error() {
        let s = settings(true, 60);
        let tables = [table(1, 2), table(2, 2)];
        assert!(available_tables(&s, &tables, &[], 19 * HOUR, 6).is_empty());
    }

    #[test]
    fn party_size_must_be_positive() {
        assert!(validate_party_size(1).is_ok());
        assert_eq!(
            validate_party_size(0),
            Err(crate::booking::BookingError::InvalidPartySize)
        );
        assert!(validate_party_size(-3).is_err());
    }

    #[test]
    fn simple_mode_cap_arithmetic() {
        // dailyPaxLimit = 10: 6 fits, then 5 does not, then 4 exactly fills
        assert!(has_capacity(0, 6, 10));
        assert!(!has_capacity(6, 5, 10));
        assert!(has_capacity(6, 4, 10));
    }

    #[test]
    fn zero_pax_limit_admits_nobody() {
        assert!(!has_capacity(0, 1, 0));
    }
}
