//! Calendar Primitives
//!
//! Side-effect-free date arithmetic over the Hong Kong trading calendar.
//!
//! ## Date Model
//!
//! Every date is a `chrono::NaiveDate` interpreted as a Hong Kong calendar
//! date. There is no time-of-day component, so holiday comparison is by
//! calendar day by construction. Instants coming from outside are converted
//! once, at the boundary, through [`hong_kong_date`].
//!
//! ## Scanning
//!
//! Business-day arithmetic walks one calendar day at a time. Holiday
//! distribution is irregular, so there is no closed-form shortcut.

pub mod clock;
pub mod holidays;

mod business_days;

pub use business_days::*;
pub use clock::{hong_kong_date, Clock, FixedClock, SystemClock, HONG_KONG};
pub use holidays::{
    covers_year, get_holiday_info, get_holidays_in_range, holiday_years, hong_kong_holidays,
    is_hong_kong_holiday, is_hong_kong_holiday_at, HolidayKind, HolidayRecord,
};

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Date arithmetic out of range: {0}")]
    OutOfRange(String),

    #[error("No business day found within {days} calendar days of {from}")]
    NoBusinessDay { from: NaiveDate, days: u32 },
}

/// Parse a caller-supplied date.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. Timestamps are converted
/// to the Hong Kong calendar date they fall on, so `2024-12-31T17:00:00Z`
/// parses as 2025-01-01.
pub fn parse_date(input: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CalendarError::InvalidDate("empty date string".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| hong_kong_date(dt.to_utc()))
        .map_err(|e| CalendarError::InvalidDate(format!("'{trimmed}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_date("2025-08-19"),
            Ok(NaiveDate::from_ymd_opt(2025, 8, 19).unwrap())
        );
        assert_eq!(
            parse_date("  2025-01-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_parse_timestamp_uses_hong_kong_date() {
        // 17:00 UTC on New Year's Eve is already 01:00 on 1 January in Hong Kong
        assert_eq!(
            parse_date("2024-12-31T17:00:00Z"),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(
            parse_date("2025-03-10T09:30:00+08:00"),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_date(""), Err(CalendarError::InvalidDate(_))));
        assert!(matches!(parse_date("not a date"), Err(CalendarError::InvalidDate(_))));
        assert!(matches!(parse_date("2025-02-30"), Err(CalendarError::InvalidDate(_))));
    }
}
