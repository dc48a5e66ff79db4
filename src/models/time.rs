//! Minute-based time arithmetic.
//!
//! Scheduling math works in fractional minutes relative to a reference
//! time; schedules carry absolute UTC timestamps. Conversions round to
//! whole microseconds so identical inputs yield identical timestamps.
//! Conversions that leave chrono's range yield `None` rather than panic.

use chrono::{DateTime, Duration, Utc};

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Converts fractional minutes into a `chrono::Duration`.
///
/// `None` when `m` is not finite or does not fit in `i64` microseconds.
pub fn minutes(m: f64) -> Option<Duration> {
    let us = (m * MICROS_PER_MINUTE).round();
    if !us.is_finite() || us.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(Duration::microseconds(us as i64))
}

/// Signed minutes from `from` to `to`.
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / MICROS_PER_MINUTE,
        None => delta.num_milliseconds() as f64 / 60_000.0,
    }
}

/// `base + m` minutes, or `None` past the representable timestamp range.
pub fn offset(base: DateTime<Utc>, m: f64) -> Option<DateTime<Utc>> {
    minutes(m).and_then(|d| base.checked_add_signed(d))
}
