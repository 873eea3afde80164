//! Pure streak arithmetic over day-bucket sets.

use super::{bucket, key};
use crate::model::habit::MAX_DAY_BUCKET;
use std::collections::BTreeSet;

/// Counts consecutive completed buckets walking backward from `today`.
///
/// Stops at the first bucket absent from `days`; returns 0 when `today`
/// itself is absent. Runs in O(streak length) set probes and terminates on
/// any finite set because the cursor is strictly decreasing.
pub fn streak(days: &BTreeSet<i64>, today: i64) -> u32 {
    let mut count = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        count += 1;
        cursor = bucket::previous(cursor);
    }
    count
}

/// Completion flags for the trailing window of `len` buckets ending at
/// `today`, oldest first. Used by the list view's per-day indicator dots.
pub fn recent_history(days: &BTreeSet<i64>, len: usize, today: i64) -> Vec<bool> {
    let len_i64 = len as i64;
    (0..len_i64)
        .map(|offset| days.contains(&(today - len_i64 + 1 + offset)))
        .collect()
}

/// Converts a mixed set of stored day identifiers into buckets.
///
/// Values at or above `MAX_DAY_BUCKET` are read as legacy calendar
/// `yyyyMMdd` keys (UTC start-of-day) and converted; undecodable legacy
/// values are dropped since they can never match a real "today". Bucket
/// values pass through unchanged. This is the migration-time conversion,
/// not an ongoing read path.
pub fn normalize_to_buckets(days: &BTreeSet<i64>) -> BTreeSet<i64> {
    days.iter()
        .filter_map(|&day| {
            if day >= MAX_DAY_BUCKET {
                key::to_start_of_day_utc(day).map(bucket::bucket_for)
            } else {
                Some(day)
            }
        })
        .collect()
}
