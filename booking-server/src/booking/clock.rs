//! Timezone Normalizer
//!
//! The client sends an ISO-8601 string that already encodes the intended UTC
//! instant. The venue's UTC offset in minutes (positive west of UTC, Mexico
//! City = 360) exists only so the server can independently derive the local
//! weekday and wall-clock time for the operating-calendar check. Offset
//! correction is applied exactly once, here.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, Utc};

use super::BookingError;

/// A reservation instant in both frames: canonical UTC for storage and
/// comparison, local wall clock for calendar checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedInstant {
    utc: DateTime<Utc>,
    local: NaiveDateTime,
}

impl NormalizedInstant {
    /// Canonical instant as Unix millis
    pub fn start_ms(&self) -> i64 {
        self.utc.timestamp_millis()
    }

    /// Local weekday index, 0 = Monday
    pub fn local_weekday(&self) -> usize {
        self.local.weekday().num_days_from_monday() as usize
    }

    /// Local wall-clock time
    pub fn local_time(&self) -> NaiveTime {
        self.local.time()
    }

    /// Local service date as the canonical YYYY-MM-DD string
    pub fn service_date(&self) -> String {
        self.local.date().format("%Y-%m-%d").to_string()
    }
}

/// Normalize a caller-supplied instant
///
/// Accepts RFC 3339 (`2025-03-01T19:00:00Z`, with or without sub-seconds or
/// an explicit offset) and the bare `YYYY-MM-DDTHH:MM[:SS]` forms, which are
/// read as UTC.
pub fn normalize(local_iso: &str, offset_minutes: i32) -> Result<NormalizedInstant, BookingError> {
    let utc = parse_instant(local_iso)
        .ok_or_else(|| BookingError::InvalidInstant(local_iso.to_string()))?;
    let local = utc.naive_utc() - Duration::minutes(offset_minutes as i64);
    Ok(NormalizedInstant { utc, local })
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}
