//! Timestamp normalization.
//!
//! Poll timestamps arrive as strings in a handful of shapes: RFC 3339 with
//! an explicit offset, or naive `YYYY-MM-DD HH:MM:SS[.frac]` (space- or
//! `T`-separated, optionally suffixed with ` UTC`). Naive timestamps are
//! interpreted as UTC; timestamps that carry an offset are converted, never
//! reinterpreted. All functions here are pure so window-boundary
//! comparisons are exactly reproducible across runs over the same snapshot.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Timezone assumed for stores without an assignment.
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("unparseable timestamp {0:?}")]
    BadTimestamp(String),
    #[error("unknown timezone id {0:?}")]
    UnknownTimezone(String),
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a raw poll timestamp into UTC.
///
/// An explicit offset is honored; a naive timestamp is taken to already be
/// in UTC.
pub fn parse_poll_timestamp(raw: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(" UTC").unwrap_or(trimmed);

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(TimeParseError::BadTimestamp(raw.to_string()))
}

/// Resolve a store's timezone assignment.
///
/// A missing assignment (`None`) falls back to [`DEFAULT_TIMEZONE`]; an
/// assignment naming an unknown zone is an error the caller must treat as
/// fatal for the run.
pub fn resolve_timezone(assigned: Option<&str>) -> Result<Tz, TimeParseError> {
    let id = assigned.unwrap_or(DEFAULT_TIMEZONE);
    id.parse::<Tz>()
        .map_err(|_| TimeParseError::UnknownTimezone(id.to_string()))
}

/// Convert a UTC instant to store-local time.
pub fn to_local(timestamp_utc: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    timestamp_utc.with_timezone(&tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_naive_space_separated() {
        let parsed = parse_poll_timestamp("2023-01-25 10:05:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 1, 25, 10, 5, 0).unwrap());
    }

    #[test]
    fn parses_naive_with_fraction_and_utc_suffix() {
        let parsed = parse_poll_timestamp("2023-01-25 10:05:00.123456 UTC").unwrap();
        assert_eq!(parsed.hour(), 10);
        assert_eq!(parsed.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn parses_t_separated_naive_as_utc() {
        let parsed = parse_poll_timestamp("2023-01-01T10:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn explicit_offset_is_converted_not_reinterpreted() {
        let parsed = parse_poll_timestamp("2023-01-01T10:00:00+05:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 1, 1, 5, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_poll_timestamp("last tuesday").unwrap_err();
        assert_eq!(err, TimeParseError::BadTimestamp("last tuesday".to_string()));
    }

    #[test]
    fn naive_timestamp_localizes_via_utc() {
        // 10:00 naive is 10:00 UTC, which is 04:00 in Chicago (CST, -06:00).
        let utc = parse_poll_timestamp("2023-01-01T10:00:00").unwrap();
        let tz = resolve_timezone(Some("America/Chicago")).unwrap();
        let local = to_local(utc, tz);
        assert_eq!(local.hour(), 4);
        assert_eq!(local.offset().to_string(), "CST");
        assert_eq!(local.to_rfc3339(), "2023-01-01T04:00:00-06:00");
    }

    #[test]
    fn missing_assignment_falls_back_to_default() {
        let tz = resolve_timezone(None).unwrap();
        assert_eq!(tz, chrono_tz::America::Chicago);
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let err = resolve_timezone(Some("Mars/Olympus_Mons")).unwrap_err();
        assert_eq!(
            err,
            TimeParseError::UnknownTimezone("Mars/Olympus_Mons".to_string())
        );
    }

    #[test]
    fn to_local_is_referentially_transparent() {
        let utc = Utc.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).unwrap();
        let tz = chrono_tz::Asia::Kolkata;
        assert_eq!(to_local(utc, tz), to_local(utc, tz));
    }
}
