//! Operating Calendar
//!
//! Pure functions over the tenant's 7-row weekday set. A window with
//! `close < open` crosses midnight and is read as
//! `[open, 24:00) ∪ [00:00, close)`; the spill-over past midnight also
//! admits instants whose own weekday row would reject them (an 01:30
//! booking during a Friday 20:00-02:00 service).

use chrono::NaiveTime;

use super::BookingError;
use crate::db::models::OperatingDay;

#[derive(Debug, Clone, Copy)]
pub struct DayWindow {
    pub is_open: bool,
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl DayWindow {
    const CLOSED: DayWindow = DayWindow {
        is_open: false,
        open: NaiveTime::MIN,
        close: NaiveTime::MIN,
    };

    /// Whether this weekday's own window admits the wall-clock time
    ///
    /// Half-open `[open, close)`. `open == close` is read as open all day.
    pub fn admits(&self, t: NaiveTime) -> bool {
        if !self.is_open {
            return false;
        }
        if self.open == self.close {
            return true;
        }
        if self.close < self.open {
            // Overnight: [open, 24:00) ∪ [00:00, close)
            t >= self.open || t < self.close
        } else {
            t >= self.open && t < self.close
        }
    }

    fn is_overnight(&self) -> bool {
        self.is_open && self.close < self.open
    }
}

/// The full week, indexed by weekday (0 = Monday)
#[derive(Debug, Clone)]
pub struct OperatingWeek {
    days: [DayWindow; 7],
}

impl OperatingWeek {
    /// Build from stored rows; weekdays missing from `rows` stay closed
    pub fn from_rows(rows: &[OperatingDay]) -> Result<Self, BookingError> {
        let mut days = [DayWindow::CLOSED; 7];
        for row in rows {
            let weekday = usize::try_from(row.weekday)
                .ok()
                .filter(|w| *w < 7)
                .ok_or_else(|| {
                    BookingError::Validation(format!("Weekday {} out of range", row.weekday))
                })?;
            days[weekday] = DayWindow {
                is_open: row.is_open,
                open: parse_hhmm(&row.open_time)?,
                close: parse_hhmm(&row.close_time)?,
            };
        }
        Ok(Self { days })
    }

    /// Whether the venue is open at a local weekday and wall-clock time
    ///
    /// True when the weekday's own window admits the time, or when the
    /// previous day's overnight window spills past midnight over it.
    pub fn is_open_at(&self, weekday: usize, t: NaiveTime) -> bool {
        let today = &self.days[weekday % 7];
        if today.admits(t) {
            return true;
        }
        let prev = &self.days[(weekday + 6) % 7];
        prev.is_overnight() && t < prev.close
    }
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| BookingError::Validation(format!("Invalid time: {s}")))
}
