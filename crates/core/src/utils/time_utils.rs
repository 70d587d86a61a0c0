use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::constants::MILLIS_PER_DAY;

/// Start of the given calendar day as a UTC instant.
///
/// Deadlines are stored as plain dates; every duration computed against one
/// is measured from 00:00 UTC of that date.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Ceiling of the number of whole days between `now` and `until`.
///
/// Partial days round up, so an instant one millisecond ahead counts as one
/// day, and an instant in the past yields zero or a negative count.
pub fn ceil_days_between(now: DateTime<Utc>, until: DateTime<Utc>) -> i64 {
    let millis = (until - now).num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) > 0)
}

/// Current time as the naive UTC timestamp used for persisted rows.
pub fn now_naive_utc() -> NaiveDateTime {
    Utc::now().naive_utc()
}
