//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Convert a std duration into whole milliseconds, saturating at `i64::MAX`.
pub fn duration_to_millis(duration: std::time::Duration) -> i64 {
    if duration.as_millis() > i64::MAX as u128 {
        i64::MAX
    } else {
        duration.as_millis() as i64
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_duration_conversions() {
        assert_eq!(
            duration_to_seconds(chrono::Duration::milliseconds(1500)),
            Some(1.5)
        );
        assert_eq!(
            duration_to_millis(std::time::Duration::from_micros(101_999)),
            101
        );
    }
}
