//! Business-day predicate and arithmetic.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::holidays::is_hong_kong_holiday;
use super::CalendarError;

/// Upper bound on consecutive non-business days a scan will cross.
///
/// Ten years of calendar days. Only reachable with an options set that
/// closes every day (e.g. a custom-holiday list covering a whole decade).
pub const MAX_SCAN_DAYS: u32 = 3_660;

/// Per-call business-day configuration.
///
/// Options apply independently: a weekend, a listed public holiday, or a
/// custom holiday each on its own makes a day a non-business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessDayOptions {
    /// Treat Saturday and Sunday as non-business days.
    pub exclude_weekends: bool,
    /// Treat Hong Kong public holidays as non-business days.
    pub exclude_holidays: bool,
    /// Additional closures (typhoon signal No. 8, black rainstorm, etc.).
    pub custom_holidays: Vec<NaiveDate>,
}

impl Default for BusinessDayOptions {
    fn default() -> Self {
        Self {
            exclude_weekends: true,
            exclude_holidays: true,
            custom_holidays: Vec::new(),
        }
    }
}

impl BusinessDayOptions {
    /// Add a custom closure date.
    pub fn with_custom_holiday(mut self, date: NaiveDate) -> Self {
        self.custom_holidays.push(date);
        self
    }
}

#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whether `date` is a business day under `options`.
pub fn is_business_day(date: NaiveDate, options: &BusinessDayOptions) -> bool {
    if options.exclude_weekends && is_weekend(date) {
        return false;
    }
    if options.exclude_holidays && is_hong_kong_holiday(date) {
        return false;
    }
    !options.custom_holidays.contains(&date)
}

/// Whether the Hong Kong market is open on `date`.
///
/// Ignores any configurable options: weekends and public holidays are
/// always closed.
pub fn is_market_open(date: NaiveDate) -> bool {
    !is_weekend(date) && !is_hong_kong_holiday(date)
}

fn step(date: NaiveDate, forward: bool) -> Result<NaiveDate, CalendarError> {
    let next = if forward {
        date.checked_add_days(Days::new(1))
    } else {
        date.checked_sub_days(Days::new(1))
    };
    next.ok_or_else(|| CalendarError::OutOfRange(format!("stepping past {date}")))
}

/// Add `n` business days to `start` (negative `n` walks backward).
///
/// `n == 0` returns `start` unchanged, business day or not. Otherwise the
/// result is the `|n|`-th business day strictly after (or before) `start`.
pub fn add_business_days(
    start: NaiveDate,
    n: i64,
    options: &BusinessDayOptions,
) -> Result<NaiveDate, CalendarError> {
    if n == 0 {
        return Ok(start);
    }

    let forward = n > 0;
    let target = n.unsigned_abs();
    let mut current = start;
    let mut counted: u64 = 0;
    let mut idle: u32 = 0;

    while counted < target {
        current = step(current, forward)?;
        if is_business_day(current, options) {
            counted += 1;
            idle = 0;
        } else {
            idle += 1;
            if idle > MAX_SCAN_DAYS {
                return Err(CalendarError::NoBusinessDay {
                    from: start,
                    days: MAX_SCAN_DAYS,
                });
            }
        }
    }

    Ok(current)
}

/// Subtract `n` business days from `start`.
pub fn subtract_business_days(
    start: NaiveDate,
    n: i64,
    options: &BusinessDayOptions,
) -> Result<NaiveDate, CalendarError> {
    let negated = n
        .checked_neg()
        .ok_or_else(|| CalendarError::OutOfRange(format!("cannot negate {n}")))?;
    add_business_days(start, negated, options)
}

/// Count business days in `[start, end]`, both ends inclusive.
///
/// Negative when `start > end`: the count of the reversed range, negated.
pub fn get_business_days_between(
    start: NaiveDate,
    end: NaiveDate,
    options: &BusinessDayOptions,
) -> i64 {
    if start > end {
        return -get_business_days_between(end, start, options);
    }

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_business_day(*d, options))
        .count() as i64
}

pub fn get_next_business_day(
    date: NaiveDate,
    options: &BusinessDayOptions,
) -> Result<NaiveDate, CalendarError> {
    add_business_days(date, 1, options)
}

pub fn get_previous_business_day(
    date: NaiveDate,
    options: &BusinessDayOptions,
) -> Result<NaiveDate, CalendarError> {
    subtract_business_days(date, 1, options)
}

/// `date` itself when it is a business day, otherwise the next one.
pub fn adjust_to_next_business_day(
    date: NaiveDate,
    options: &BusinessDayOptions,
) -> Result<NaiveDate, CalendarError> {
    if is_business_day(date, options) {
        Ok(date)
    } else {
        get_next_business_day(date, options)
    }
}

/// `date` itself when it is a business day, otherwise the previous one.
pub fn adjust_to_previous_business_day(
    date: NaiveDate,
    options: &BusinessDayOptions,
) -> Result<NaiveDate, CalendarError> {
    if is_business_day(date, options) {
        Ok(date)
    } else {
        get_previous_business_day(date, options)
    }
}

/// Plain calendar-day offset, used when holiday adjustment is switched off.
pub fn add_calendar_days(start: NaiveDate, n: i64) -> Result<NaiveDate, CalendarError> {
    let days = Days::new(n.unsigned_abs());
    let shifted = if n >= 0 {
        start.checked_add_days(days)
    } else {
        start.checked_sub_days(days)
    };
    shifted.ok_or_else(|| CalendarError::OutOfRange(format!("{start} offset by {n} days")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hk() -> BusinessDayOptions {
        BusinessDayOptions::default()
    }

    #[test]
    fn test_weekend_and_holiday_predicate() {
        assert!(!is_business_day(date(2025, 1, 1), &hk())); // New Year's Day, Wednesday
        assert!(!is_business_day(date(2025, 8, 23), &hk())); // Saturday
        assert!(!is_business_day(date(2025, 8, 24), &hk())); // Sunday
        assert!(is_business_day(date(2025, 8, 19), &hk())); // ordinary Tuesday
    }

    #[test]
    fn test_options_apply_independently() {
        let weekends_only = BusinessDayOptions {
            exclude_holidays: false,
            ..hk()
        };
        assert!(is_business_day(date(2025, 1, 1), &weekends_only));
        assert!(!is_business_day(date(2025, 1, 4), &weekends_only));

        let holidays_only = BusinessDayOptions {
            exclude_weekends: false,
            ..hk()
        };
        assert!(is_business_day(date(2025, 1, 4), &holidays_only));
        assert!(!is_business_day(date(2025, 1, 1), &holidays_only));

        // Custom closures still apply with both switches off
        let custom = BusinessDayOptions {
            exclude_weekends: false,
            exclude_holidays: false,
            custom_holidays: vec![date(2025, 9, 10)],
        };
        assert!(!is_business_day(date(2025, 9, 10), &custom));
        assert!(is_business_day(date(2025, 9, 13), &custom));
    }

    #[test]
    fn test_market_open_ignores_options() {
        assert!(!is_market_open(date(2025, 1, 1)));
        assert!(!is_market_open(date(2025, 8, 23)));
        assert!(is_market_open(date(2025, 8, 19)));
    }

    #[test]
    fn test_add_zero_returns_start() {
        let sat = date(2025, 8, 23);
        assert_eq!(add_business_days(sat, 0, &hk()), Ok(sat));
    }

    #[test]
    fn test_add_skips_weekend() {
        // Friday + 1 = Monday
        assert_eq!(add_business_days(date(2025, 8, 22), 1, &hk()), Ok(date(2025, 8, 25)));
        // Tuesday + 1 = Wednesday
        assert_eq!(add_business_days(date(2025, 8, 19), 1, &hk()), Ok(date(2025, 8, 20)));
    }

    #[test]
    fn test_add_skips_lunar_new_year() {
        // 2025-01-28 (Tue) + 1: 29/30/31 Jan are Lunar New Year holidays,
        // 1-2 Feb is a weekend, so the next business day is Monday 3 Feb
        assert_eq!(add_business_days(date(2025, 1, 28), 1, &hk()), Ok(date(2025, 2, 3)));
    }

    #[test]
    fn test_subtract_skips_easter() {
        // 2025-04-22 (Tue) - 1: 21 Apr Easter Monday, 19-20 weekend, 18 Good Friday
        assert_eq!(
            subtract_business_days(date(2025, 4, 22), 1, &hk()),
            Ok(date(2025, 4, 17))
        );
        assert_eq!(
            add_business_days(date(2025, 4, 22), -1, &hk()),
            Ok(date(2025, 4, 17))
        );
    }

    #[test]
    fn test_business_days_between() {
        // Mon 18 Aug .. Fri 22 Aug 2025 inclusive
        assert_eq!(get_business_days_between(date(2025, 8, 18), date(2025, 8, 22), &hk()), 5);
        assert_eq!(get_business_days_between(date(2025, 8, 22), date(2025, 8, 18), &hk()), -5);
        // Single weekend day
        assert_eq!(get_business_days_between(date(2025, 8, 23), date(2025, 8, 23), &hk()), 0);
        // Christmas week 2025: 25 and 26 Dec are holidays
        assert_eq!(get_business_days_between(date(2025, 12, 22), date(2025, 12, 26), &hk()), 3);
    }

    #[test]
    fn test_adjust_helpers() {
        let wed = date(2025, 8, 20);
        assert_eq!(adjust_to_next_business_day(wed, &hk()), Ok(wed));
        assert_eq!(adjust_to_previous_business_day(wed, &hk()), Ok(wed));

        let sat = date(2025, 8, 23);
        assert_eq!(adjust_to_next_business_day(sat, &hk()), Ok(date(2025, 8, 25)));
        assert_eq!(adjust_to_previous_business_day(sat, &hk()), Ok(date(2025, 8, 22)));
    }

    #[test]
    fn test_every_day_closed_terminates() {
        let start = date(2025, 1, 1);
        let closed = BusinessDayOptions {
            exclude_weekends: false,
            exclude_holidays: false,
            custom_holidays: start.iter_days().take(4_000).collect(),
        };
        assert!(matches!(
            add_business_days(start, 1, &closed),
            Err(CalendarError::NoBusinessDay { .. })
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            add_business_days(NaiveDate::MAX, 1, &hk()),
            Err(CalendarError::OutOfRange(_))
        ));
        assert!(matches!(
            add_calendar_days(NaiveDate::MIN, -1),
            Err(CalendarError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_calendar_days() {
        assert_eq!(add_calendar_days(date(2025, 8, 19), 5), Ok(date(2025, 8, 24)));
        assert_eq!(add_calendar_days(date(2025, 8, 19), -19), Ok(date(2025, 7, 31)));
    }
}
