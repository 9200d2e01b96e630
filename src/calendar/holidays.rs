//! Hong Kong general holidays
//!
//! Hand-curated from the Government gazette. Lunar-calendar festivals
//! (Lunar New Year, Ching Ming, Buddha's Birthday, Tuen Ng, Mid-Autumn,
//! Chung Yeung) move every year and cannot be derived, so each year is
//! listed explicitly, including the substitute days granted when a festival
//! falls on a Sunday.
//!
//! Extend `RAW_HOLIDAYS` when the next year's list is gazetted.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::clock::hong_kong_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    PublicHoliday,
}

/// A single gazetted holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub date: NaiveDate,
    pub name: String,
    pub kind: HolidayKind,
}

const RAW_HOLIDAYS: &[(i32, u32, u32, &str)] = &[
    // 2024
    (2024, 1, 1, "The first day of January"),
    (2024, 2, 10, "Lunar New Year's Day"),
    (2024, 2, 12, "The third day of Lunar New Year"),
    (2024, 2, 13, "The fourth day of Lunar New Year"),
    (2024, 3, 29, "Good Friday"),
    (2024, 3, 30, "The day following Good Friday"),
    (2024, 4, 1, "Easter Monday"),
    (2024, 4, 4, "Ching Ming Festival"),
    (2024, 5, 1, "Labour Day"),
    (2024, 5, 15, "The Birthday of the Buddha"),
    (2024, 6, 10, "Tuen Ng Festival"),
    (2024, 7, 1, "Hong Kong Special Administrative Region Establishment Day"),
    (2024, 9, 18, "The day following the Chinese Mid-Autumn Festival"),
    (2024, 10, 1, "National Day"),
    (2024, 10, 11, "Chung Yeung Festival"),
    (2024, 12, 25, "Christmas Day"),
    (2024, 12, 26, "The first weekday after Christmas Day"),
    // 2025
    (2025, 1, 1, "The first day of January"),
    (2025, 1, 29, "Lunar New Year's Day"),
    (2025, 1, 30, "The second day of Lunar New Year"),
    (2025, 1, 31, "The third day of Lunar New Year"),
    (2025, 4, 4, "Ching Ming Festival"),
    (2025, 4, 18, "Good Friday"),
    (2025, 4, 19, "The day following Good Friday"),
    (2025, 4, 21, "Easter Monday"),
    (2025, 5, 1, "Labour Day"),
    (2025, 5, 5, "The Birthday of the Buddha"),
    (2025, 5, 31, "Tuen Ng Festival"),
    (2025, 7, 1, "Hong Kong Special Administrative Region Establishment Day"),
    (2025, 10, 1, "National Day"),
    (2025, 10, 7, "The day following the Chinese Mid-Autumn Festival"),
    (2025, 10, 29, "Chung Yeung Festival"),
    (2025, 12, 25, "Christmas Day"),
    (2025, 12, 26, "The first weekday after Christmas Day"),
    // 2026
    (2026, 1, 1, "The first day of January"),
    (2026, 2, 17, "Lunar New Year's Day"),
    (2026, 2, 18, "The second day of Lunar New Year"),
    (2026, 2, 19, "The third day of Lunar New Year"),
    (2026, 4, 3, "Good Friday"),
    (2026, 4, 4, "The day following Good Friday"),
    (2026, 4, 6, "The day following Ching Ming Festival"),
    (2026, 4, 7, "The day following Easter Monday"),
    (2026, 5, 1, "Labour Day"),
    (2026, 5, 25, "The day following the Birthday of the Buddha"),
    (2026, 6, 19, "Tuen Ng Festival"),
    (2026, 7, 1, "Hong Kong Special Administrative Region Establishment Day"),
    (2026, 9, 26, "The day following the Chinese Mid-Autumn Festival"),
    (2026, 10, 1, "National Day"),
    (2026, 10, 19, "The day following Chung Yeung Festival"),
    (2026, 12, 25, "Christmas Day"),
    (2026, 12, 26, "The first weekday after Christmas Day"),
];

static HOLIDAYS: OnceLock<BTreeMap<NaiveDate, HolidayRecord>> = OnceLock::new();

fn table() -> &'static BTreeMap<NaiveDate, HolidayRecord> {
    HOLIDAYS.get_or_init(|| {
        RAW_HOLIDAYS
            .iter()
            .filter_map(|&(y, m, d, name)| {
                NaiveDate::from_ymd_opt(y, m, d).map(|date| {
                    (
                        date,
                        HolidayRecord {
                            date,
                            name: name.to_string(),
                            kind: HolidayKind::PublicHoliday,
                        },
                    )
                })
            })
            .collect()
    })
}

/// All compiled-in holidays in date order.
pub fn hong_kong_holidays() -> impl Iterator<Item = &'static HolidayRecord> {
    table().values()
}

pub fn is_hong_kong_holiday(date: NaiveDate) -> bool {
    table().contains_key(&date)
}

/// Holiday check for an instant, judged by the Hong Kong calendar date.
pub fn is_hong_kong_holiday_at(instant: DateTime<Utc>) -> bool {
    is_hong_kong_holiday(hong_kong_date(instant))
}

pub fn get_holiday_info(date: NaiveDate) -> Option<&'static HolidayRecord> {
    table().get(&date)
}

/// Holidays in `[start, end]` inclusive. Empty when `start > end`.
pub fn get_holidays_in_range(start: NaiveDate, end: NaiveDate) -> Vec<&'static HolidayRecord> {
    if start > end {
        return Vec::new();
    }
    table().range(start..=end).map(|(_, rec)| rec).collect()
}

/// Years for which the table is curated.
pub fn holiday_years() -> Vec<i32> {
    let mut years: Vec<i32> = RAW_HOLIDAYS.iter().map(|&(y, ..)| y).collect();
    years.dedup();
    years
}

pub fn covers_year(year: i32) -> bool {
    RAW_HOLIDAYS.iter().any(|&(y, ..)| y == year)
}
