//! Injectable source of "now".
//!
//! The engine never reads the system clock directly. Production code uses
//! [`SystemClock`]; tests and demos pin time with [`FixedClock`].

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Exchange timezone. All calendar dates in this crate are Hong Kong dates.
pub const HONG_KONG: Tz = chrono_tz::Asia::Hong_Kong;

/// Hong Kong calendar date of an instant.
pub fn hong_kong_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&HONG_KONG).date_naive()
}

pub trait Clock: Send + Sync {
    /// Current instant in Hong Kong time.
    fn now(&self) -> DateTime<Tz>;

    /// Current Hong Kong calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock, converted to Hong Kong time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&HONG_KONG)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Tz>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Tz>) -> Self {
        Self { instant }
    }

    /// Frozen at 09:00 Hong Kong time on `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        let local = date.and_hms_opt(9, 0, 0).unwrap_or_default();
        let instant = HONG_KONG
            .from_local_datetime(&local)
            .single()
            .unwrap_or_else(|| HONG_KONG.from_utc_datetime(&local));
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.instant
    }
}
