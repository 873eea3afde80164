//! Fixed-window day buckets.
//!
//! A day is an exact 86,400-second window counted from the Unix epoch
//! (UTC). Buckets are timezone-independent, so a streak never shifts when
//! the device changes timezone or crosses a DST boundary.

use chrono::{DateTime, Utc};

/// Length of one bucket window in seconds.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Returns the bucket index containing the given instant.
///
/// Euclidean division keeps pre-epoch instants in the correct (negative)
/// bucket instead of rounding toward zero.
pub fn bucket_for(instant: DateTime<Utc>) -> i64 {
    instant.timestamp().div_euclid(SECONDS_PER_DAY)
}

/// Bucket index for the current instant.
pub fn today() -> i64 {
    bucket_for(Utc::now())
}

/// Bucket immediately before `bucket`. Strict inverse of stepping forward
/// by one bucket.
pub fn previous(bucket: i64) -> i64 {
    bucket - 1
}

/// Opening instant of the given bucket.
///
/// Returns `None` only when the bucket is outside the representable
/// timestamp range.
pub fn start_of_bucket(bucket: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(bucket.checked_mul(SECONDS_PER_DAY)?, 0)
}

#[cfg(test)]
mod tests {
    use super::{bucket_for, previous, start_of_bucket, SECONDS_PER_DAY};
    use chrono::{TimeZone, Utc};

    #[test]
    fn epoch_is_bucket_zero() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(bucket_for(epoch), 0);
    }

    #[test]
    fn last_second_of_window_stays_in_bucket() {
        let end = Utc.with_ymd_and_hms(1970, 1, 1, 23, 59, 59).unwrap();
        assert_eq!(bucket_for(end), 0);
        let next = Utc.with_ymd_and_hms(1970, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(bucket_for(next), 1);
    }

    #[test]
    fn pre_epoch_instants_floor_into_negative_buckets() {
        let before = Utc.with_ymd_and_hms(1969, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(bucket_for(before), -1);
    }

    #[test]
    fn previous_is_inverse_of_step_forward() {
        assert_eq!(previous(20_346), 20_345);
        assert_eq!(previous(0), -1);
    }

    #[test]
    fn start_of_bucket_round_trips() {
        let noon = Utc.with_ymd_and_hms(2025, 9, 15, 12, 30, 0).unwrap();
        let bucket = bucket_for(noon);
        let start = start_of_bucket(bucket).unwrap();
        assert_eq!(bucket_for(start), bucket);
        assert_eq!(start.timestamp() % SECONDS_PER_DAY, 0);
    }

    #[test]
    fn known_date_maps_to_known_bucket() {
        let instant = Utc.with_ymd_and_hms(2025, 9, 15, 8, 0, 0).unwrap();
        assert_eq!(bucket_for(instant), 20_346);
    }
}
