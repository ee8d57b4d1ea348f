//! Time helpers
//!
//! All timestamps cross the repository boundary as `i64` Unix millis; local
//! service dates travel as `YYYY-MM-DD` strings. Conversions live here and in
//! the booking normalizer, nowhere else.

use chrono::{NaiveDate, NaiveTime};

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a wall-clock time string (HH:MM)
pub fn parse_hhmm(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// Format a date as the canonical YYYY-MM-DD service-date string
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Current Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
