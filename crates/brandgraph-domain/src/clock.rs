//! Wall clock helpers
//!
//! Timestamps are seconds since the Unix epoch. Every time-dependent
//! operation in the engine also takes an explicit `now` so it can be
//! driven deterministically.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds in an hour
pub const SECONDS_PER_HOUR: u64 = 3600;

/// Seconds in a day
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Current timestamp in seconds since Unix epoch
///
/// A clock set before the epoch reads as 0.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Timestamp `days` before `now`, saturating at the epoch
pub fn days_before(now: u64, days: u64) -> u64 {
    now.saturating_sub(days.saturating_mul(SECONDS_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_before_saturates() {
        assert_eq!(days_before(10 * SECONDS_PER_DAY, 3), 7 * SECONDS_PER_DAY);
        assert_eq!(days_before(5, 1), 0);
    }

    #[test]
    fn test_clock_is_after_2020() {
        assert!(current_timestamp() > 1_577_836_800);
    }
}
