//! Read-only reducers over an already-scoped list of reading sessions.
//!
//! Scoping by owner, book and date range happens in the repository. Every
//! function here recomputes from the slice it is given and touches no state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::Result;
use crate::metrics::reading_speed;
use crate::timezone::{self, DEFAULT_TIMEZONE};

/// Pages-per-hour change beyond which the velocity trend stops being stable.
// Tunable, but there is no configuration surface for it yet.
pub const TREND_THRESHOLD: i64 = 5;

/// Share of the most recent sessions that forms the "recent" window.
pub const RECENT_WINDOW_FRACTION: f64 = 0.3;

/// Lower bound on the recent window size.
pub const MIN_RECENT_SESSIONS: usize = 1;

/// One session as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSample {
    pub pages_read: i64,
    pub duration_seconds: i64,
    pub start_time: DateTime<Utc>,
    /// IANA timezone of the owning user. `None` or blank means the default.
    pub timezone: Option<String>,
}

/// Aggregate for one local hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourBucket {
    pub hour: u32,
    pub average_speed: i64,
    pub total_pages: i64,
    pub total_duration: i64,
    pub session_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlySpeed {
    pub speed_by_hour: Vec<HourBucket>,
    pub total_sessions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    /// Classifies a change in pages per hour against [`TREND_THRESHOLD`].
    pub fn classify(velocity_change: i64) -> Self {
        if velocity_change > TREND_THRESHOLD {
            Trend::Increasing
        } else if velocity_change < -TREND_THRESHOLD {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Velocity {
    pub average_speed: i64,
    pub recent_speed: i64,
    pub velocity_change: i64,
    pub trend: Trend,
    pub total_sessions: usize,
}

impl Velocity {
    fn empty() -> Self {
        Self {
            average_speed: 0,
            recent_speed: 0,
            velocity_change: 0,
            trend: Trend::Stable,
            total_sessions: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_sessions: usize,
    pub total_books: u64,
    pub total_pages_read: i64,
    pub total_reading_time: i64,
    pub average_speed: i64,
    pub average_session_duration: i64,
}

#[derive(Default)]
struct Totals {
    pages: i64,
    duration: i64,
    count: usize,
}

impl Totals {
    fn add(&mut self, session: &SessionSample) {
        self.pages += session.pages_read;
        self.duration += session.duration_seconds;
        self.count += 1;
    }

    fn speed(&self) -> i64 {
        reading_speed(self.pages, self.duration)
    }
}

fn totals<'a>(sessions: impl IntoIterator<Item = &'a SessionSample>) -> Totals {
    let mut totals = Totals::default();
    for session in sessions {
        totals.add(session);
    }
    totals
}

/// Groups sessions by the local hour they started in and reports the speed
/// of each non-empty hour, earliest hour first.
///
/// Fails with [`crate::Error::Configuration`] if any session carries an
/// unknown timezone.
pub fn hourly_speed(sessions: &[SessionSample]) -> Result<HourlySpeed> {
    // Sessions in one scope usually share a single owner, hence one zone.
    let mut zones: BTreeMap<&str, Tz> = BTreeMap::new();
    let mut buckets: BTreeMap<u32, Totals> = BTreeMap::new();

    for session in sessions {
        let zone_id = timezone::resolve_timezone_id(session.timezone.as_deref(), DEFAULT_TIMEZONE);
        let tz = match zones.get(zone_id) {
            Some(tz) => *tz,
            None => {
                let tz = timezone::parse_timezone(zone_id)?;
                zones.insert(zone_id, tz);
                tz
            }
        };
        let hour = timezone::local_hour(session.start_time, tz);
        buckets.entry(hour).or_default().add(session);
    }

    let speed_by_hour = buckets
        .into_iter()
        .map(|(hour, totals)| HourBucket {
            hour,
            average_speed: totals.speed(),
            total_pages: totals.pages,
            total_duration: totals.duration,
            session_count: totals.count,
        })
        .collect();

    Ok(HourlySpeed {
        speed_by_hour,
        total_sessions: sessions.len(),
    })
}

/// Compares the speed of the most recent sessions with the overall speed.
///
/// Input order does not matter; sessions are ordered by start time before the
/// recent window (the last 30%, at least one session) is taken.
pub fn velocity(sessions: &[SessionSample]) -> Velocity {
    if sessions.is_empty() {
        return Velocity::empty();
    }

    let mut ordered: Vec<&SessionSample> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.start_time);

    let average_speed = totals(ordered.iter().copied()).speed();

    let recent_count = recent_window_len(ordered.len());
    let recent = &ordered[ordered.len() - recent_count..];
    let recent_speed = totals(recent.iter().copied()).speed();

    let velocity_change = recent_speed - average_speed;

    Velocity {
        average_speed,
        recent_speed,
        velocity_change,
        trend: Trend::classify(velocity_change),
        total_sessions: sessions.len(),
    }
}

fn recent_window_len(total: usize) -> usize {
    let fraction = (total as f64 * RECENT_WINDOW_FRACTION).floor() as usize;
    fraction.max(MIN_RECENT_SESSIONS).min(total)
}

/// Overall totals for a scope. `book_count` comes from the repository since
/// books without sessions still count.
pub fn summary(sessions: &[SessionSample], book_count: u64) -> Summary {
    let totals = totals(sessions);
    let average_session_duration = if totals.count == 0 {
        0
    } else {
        (totals.duration as f64 / totals.count as f64).round() as i64
    };

    Summary {
        total_sessions: totals.count,
        total_books: book_count,
        total_pages_read: totals.pages,
        total_reading_time: totals.duration,
        average_speed: totals.speed(),
        average_session_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
    }

    fn sample(pages: i64, secs: i64, offset_hours: i64) -> SessionSample {
        SessionSample {
            pages_read: pages,
            duration_seconds: secs,
            start_time: base() + Duration::hours(offset_hours),
            timezone: Some("UTC".to_string()),
        }
    }

    #[test]
    fn hourly_merges_same_hour_and_sorts() {
        let sessions = vec![
            sample(20, 1800, 14),
            sample(10, 600, 9),
            sample(15, 900, 24 + 9),
        ];
        let result = hourly_speed(&sessions).unwrap();
        assert_eq!(result.total_sessions, 3);
        assert_eq!(result.speed_by_hour.len(), 2);

        let nine = &result.speed_by_hour[0];
        assert_eq!(nine.hour, 9);
        assert_eq!(nine.session_count, 2);
        assert_eq!(nine.total_pages, 25);
        assert_eq!(nine.total_duration, 1500);
        assert_eq!(nine.average_speed, 60);

        let fourteen = &result.speed_by_hour[1];
        assert_eq!(fourteen.hour, 14);
        assert_eq!(fourteen.session_count, 1);
        assert_eq!(fourteen.average_speed, 40);
    }

    #[test]
    fn hourly_uses_owner_timezone_and_default() {
        // 04:00 UTC is 09:30 in Kolkata, the default zone.
        let mut default_zone = sample(10, 600, 4);
        default_zone.timezone = None;
        let mut tokyo = sample(10, 600, 4);
        tokyo.timezone = Some("Asia/Tokyo".to_string());

        let result = hourly_speed(&[default_zone, tokyo]).unwrap();
        let hours: Vec<u32> = result.speed_by_hour.iter().map(|b| b.hour).collect();
        assert_eq!(hours, vec![9, 13]);
    }

    #[test]
    fn hourly_rejects_unknown_timezone() {
        let mut bad = sample(10, 600, 4);
        bad.timezone = Some("Nowhere/Special".to_string());
        assert!(matches!(hourly_speed(&[bad]), Err(Error::Configuration(_))));
    }

    #[test]
    fn hourly_empty_input() {
        let result = hourly_speed(&[]).unwrap();
        assert!(result.speed_by_hour.is_empty());
        assert_eq!(result.total_sessions, 0);
    }

    #[test]
    fn velocity_empty_is_stable_zero() {
        let result = velocity(&[]);
        assert_eq!(result.average_speed, 0);
        assert_eq!(result.recent_speed, 0);
        assert_eq!(result.velocity_change, 0);
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.total_sessions, 0);
    }

    #[test]
    fn velocity_single_session() {
        let result = velocity(&[sample(30, 3600, 0)]);
        assert_eq!(result.average_speed, 30);
        assert_eq!(result.recent_speed, 30);
        assert_eq!(result.velocity_change, 0);
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.total_sessions, 1);
    }

    #[test]
    fn velocity_orders_before_taking_recent_window() {
        // Ten sessions: the three latest read 60 pages/hour, the rest 30.
        let mut sessions: Vec<SessionSample> = (0..7).map(|h| sample(30, 3600, h)).collect();
        sessions.extend((7..10).map(|h| sample(60, 3600, h)));
        sessions.reverse();

        let result = velocity(&sessions);
        // 390 pages over 10 hours.
        assert_eq!(result.average_speed, 39);
        assert_eq!(result.recent_speed, 60);
        assert_eq!(result.velocity_change, 21);
        assert_eq!(result.trend, Trend::Increasing);
        assert_eq!(result.total_sessions, 10);
    }

    #[test]
    fn velocity_decreasing() {
        let mut sessions: Vec<SessionSample> = (0..3).map(|h| sample(60, 3600, h)).collect();
        sessions.push(sample(10, 3600, 3));
        // Window of four is floor(1.2) = 1 session.
        let result = velocity(&sessions);
        assert_eq!(result.average_speed, 48);
        assert_eq!(result.recent_speed, 10);
        assert_eq!(result.trend, Trend::Decreasing);
    }

    #[test]
    fn trend_threshold_is_exclusive() {
        assert_eq!(Trend::classify(5), Trend::Stable);
        assert_eq!(Trend::classify(-5), Trend::Stable);
        assert_eq!(Trend::classify(6), Trend::Increasing);
        assert_eq!(Trend::classify(-6), Trend::Decreasing);
    }

    #[test]
    fn recent_window_sizes() {
        assert_eq!(recent_window_len(1), 1);
        assert_eq!(recent_window_len(3), 1);
        assert_eq!(recent_window_len(4), 1);
        assert_eq!(recent_window_len(7), 2);
        assert_eq!(recent_window_len(10), 3);
    }

    #[test]
    fn summary_totals() {
        let result = summary(&[sample(10, 600, 0), sample(20, 1200, 1)], 1);
        assert_eq!(result.total_sessions, 2);
        assert_eq!(result.total_books, 1);
        assert_eq!(result.total_pages_read, 30);
        assert_eq!(result.total_reading_time, 1800);
        assert_eq!(result.average_speed, 60);
        assert_eq!(result.average_session_duration, 900);
    }

    #[test]
    fn summary_counts_books_without_sessions() {
        let result = summary(&[], 3);
        assert_eq!(result.total_sessions, 0);
        assert_eq!(result.total_books, 3);
        assert_eq!(result.average_speed, 0);
        assert_eq!(result.average_session_duration, 0);
    }

    #[test]
    fn summary_rounds_average_duration() {
        let result = summary(&[sample(1, 1, 0), sample(1, 2, 1)], 1);
        assert_eq!(result.average_session_duration, 2);
    }

    #[test]
    fn serialized_shape_uses_camel_case() {
        let json = serde_json::to_value(velocity(&[])).unwrap();
        assert_eq!(json["trend"], "stable");
        assert_eq!(json["velocityChange"], 0);

        let json = serde_json::to_value(summary(&[], 0)).unwrap();
        assert!(json.get("averageSessionDuration").is_some());
    }
}
