//! Local wall-clock reconstruction.
//!
//! "Today" and the cutoff comparison are computed on naive local date-times
//! so that DST gaps and overlaps never turn into ambiguous-instant failures.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::EstimateError;

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz, EstimateError> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| EstimateError::InvalidTimezone(format!("'{}'", s)))
}

/// Parse an RFC 3339 datetime, keeping its offset.
pub fn parse_now(s: &str) -> Result<DateTime<FixedOffset>, EstimateError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map_err(|e| EstimateError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// The wall-clock date-time of `now` as seen in `time_zone`.
///
/// A missing, blank or unknown zone name keeps `now`'s own offset, i.e. the
/// caller's local clock.
pub fn local_wall_clock<O: TimeZone>(now: &DateTime<O>, time_zone: Option<&str>) -> NaiveDateTime {
    match time_zone.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => match parse_timezone(name) {
            Ok(tz) => now.with_timezone(&tz).naive_local(),
            Err(_) => {
                tracing::debug!(time_zone = name, "unknown time zone, using caller offset");
                now.naive_local()
            }
        },
        None => now.naive_local(),
    }
}
