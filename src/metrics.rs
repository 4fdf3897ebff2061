//! Pure conversions from raw page and time deltas to durations and speeds.

use chrono::{DateTime, Utc};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Whole seconds between `start` and `end`.
///
/// The millisecond difference is truncated toward zero. Callers guarantee
/// `end > start`; session derivation rejects anything else before calling.
pub fn duration_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds() / 1000
}

/// Pages covered by a session.
pub fn pages_read(start_page: i32, end_page: i32) -> i32 {
    end_page - start_page
}

/// Reading speed in pages per hour, rounded half away from zero.
///
/// A zero duration yields `0` rather than an error.
///
/// # Examples
///
/// ```
/// use readpulse::metrics::reading_speed;
///
/// assert_eq!(reading_speed(85, 1800), 170);
/// assert_eq!(reading_speed(12, 0), 0);
/// ```
pub fn reading_speed(pages_read: i64, duration_seconds: i64) -> i64 {
    if duration_seconds == 0 {
        return 0;
    }
    (pages_read as f64 / duration_seconds as f64 * SECONDS_PER_HOUR).round() as i64
}

/// Human-readable speed, e.g. `"25 pages/hour"`.
pub fn format_reading_speed(pages_read: i64, duration_seconds: i64) -> String {
    format!("{} pages/hour", reading_speed(pages_read, duration_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn duration_truncates_partial_seconds() {
        let start = at(0);
        let end = start + Duration::milliseconds(1999);
        assert_eq!(duration_seconds(start, end), 1);
        assert_eq!(duration_seconds(at(0), at(1800)), 1800);
    }

    #[test]
    fn pages_read_is_difference() {
        assert_eq!(pages_read(10, 95), 85);
    }

    #[test]
    fn speed_matches_rounded_formula() {
        for (pages, secs) in [(30, 3600), (85, 1800), (1, 7), (7, 13), (0, 60), (250, 1)] {
            let expected = (pages as f64 / secs as f64 * 3600.0).round() as i64;
            assert_eq!(reading_speed(pages, secs), expected, "{pages} pages in {secs}s");
        }
    }

    #[test]
    fn speed_is_zero_without_duration() {
        assert_eq!(reading_speed(0, 0), 0);
        assert_eq!(reading_speed(500, 0), 0);
    }

    #[test]
    fn speed_rounds_half_away_from_zero() {
        // 3 pages in 2400s is exactly 4.5 pages/hour.
        assert_eq!(reading_speed(3, 2400), 5);
        assert_eq!(reading_speed(1, 4800), 1);
        assert_eq!(reading_speed(1, 14400), 0);
    }

    #[test]
    fn formatted_speed() {
        assert_eq!(format_reading_speed(30, 3600), "30 pages/hour");
        assert_eq!(format_reading_speed(3, 0), "0 pages/hour");
    }
}
