//! Local hour-of-day bucketing for absolute timestamps.
//!
//! Timestamps are stored in UTC. Converting an instant into a zone is always
//! unambiguous, so DST gaps and overlaps never produce an out-of-range hour:
//! an instant inside a fall-back overlap reports the wall-clock hour in
//! effect at that instant, and no instant maps into a spring-forward gap.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Timezone applied to users that never set one.
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// Parses an IANA timezone identifier.
///
/// Unknown identifiers are a configuration error, never a silent fallback.
pub fn parse_timezone(timezone_id: &str) -> Result<Tz> {
    timezone_id
        .parse::<Tz>()
        .map_err(|_| Error::Configuration(format!("unknown timezone '{timezone_id}'")))
}

/// Substitutes `default` for a missing or blank timezone identifier.
pub fn resolve_timezone_id<'a>(timezone_id: Option<&'a str>, default: &'a str) -> &'a str {
    match timezone_id.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => default,
    }
}

/// Local wall-clock hour (0..=23) of `timestamp` in `timezone_id`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use readpulse::timezone::hour_of_day;
///
/// let ts = Utc.with_ymd_and_hms(2024, 3, 1, 4, 0, 0).unwrap();
/// assert_eq!(hour_of_day(ts, "Asia/Kolkata").unwrap(), 9);
/// ```
pub fn hour_of_day(timestamp: DateTime<Utc>, timezone_id: &str) -> Result<u32> {
    let tz = parse_timezone(timezone_id)?;
    Ok(local_hour(timestamp, tz))
}

pub(crate) fn local_hour(timestamp: DateTime<Utc>, tz: Tz) -> u32 {
    timestamp.with_timezone(&tz).hour()
}
