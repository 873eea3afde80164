//! Legacy calendar `yyyyMMdd` day keys.
//!
//! Earlier builds stored completion days as compact calendar integers
//! (`year * 10_000 + month * 100 + day`). The codec is retained so those
//! rows can be converted to fixed-window buckets during the one-way data
//! migration at database open. New writes never produce calendar keys.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Encodes a calendar date as a `yyyyMMdd` integer.
pub fn encode(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

/// Decodes a `yyyyMMdd` integer back into a calendar date.
///
/// Returns `None` for keys that do not name a real date (bad month/day
/// fields, nonexistent dates such as `20250230`).
pub fn decode(key: i64) -> Option<NaiveDate> {
    let year = i32::try_from(key / 10_000).ok()?;
    let month = u32::try_from((key / 100) % 100).ok()?;
    let day = u32::try_from(key % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Key for the calendar day immediately before `key`.
///
/// Rolls over month and year boundaries, including leap days. Returns
/// `None` when `key` itself is not decodable.
pub fn previous(key: i64) -> Option<i64> {
    decode(key)?.pred_opt().map(encode)
}

/// Key for the calendar day containing the given instant, in UTC.
pub fn for_instant(instant: DateTime<Utc>) -> i64 {
    encode(instant.date_naive())
}

/// Start-of-day instant (UTC) for the given key. Inverse of `encode` over
/// start-of-day instants.
pub fn to_start_of_day_utc(key: i64) -> Option<DateTime<Utc>> {
    decode(key)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
