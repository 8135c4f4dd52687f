//! Time helpers for slurmrestd payloads.

use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;

/// Decode a unix timestamp. Slurm uses 0 for "never", which maps to None.
pub fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    Utc.timestamp_opt(secs, 0).single()
}

/// Encode a timestamp for the wire.
pub fn to_unix(ts: Option<DateTime<Utc>>) -> Option<i64> {
    ts.map(|t| t.timestamp())
}

/// Parse a duration in various formats.
///
/// Supports:
/// - D-HH:MM:SS (time limit with days)
/// - HH:MM:SS
/// - MM:SS
/// - Seconds as integer
///
/// Returns None for "UNLIMITED", empty strings, or values whose total
/// seconds overflow a u64.
pub fn parse_duration(s: &str) -> Option<Duration> {
    if s.is_empty() || s == "UNLIMITED" || s == "INFINITE" {
        return None;
    }

    let (days, time_part) = match s.split_once('-') {
        Some((d, rest)) => (d.parse::<u64>().ok()?, rest),
        None => (0, s),
    };

    let time_parts: Vec<u64> = time_part
        .split(':')
        .map(|p| p.parse().ok())
        .collect::<Option<Vec<u64>>>()?;

    let (h, m, s) = match time_parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => (0, *m, *s),
        [s] => (0, 0, *s),
        _ => return None,
    };

    let seconds = days
        .checked_mul(86400)?
        .checked_add(h.checked_mul(3600)?)?
        .checked_add(m.checked_mul(60)?)?
        .checked_add(s)?;
    Some(Duration::from_secs(seconds))
}

/// Whole minutes in a duration, rounded up. Time limits are minutes on the wire.
pub fn minutes_from_duration(d: Duration) -> u32 {
    let secs = d.as_secs();
    u32::try_from(secs.div_ceil(60)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unix() {
        let dt = from_unix(1_705_314_600).unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");
        assert!(from_unix(0).is_none());
        assert!(from_unix(-1).is_none());
    }

    #[test]
    fn test_to_unix() {
        assert_eq!(to_unix(from_unix(1_705_314_600)), Some(1_705_314_600));
        assert_eq!(to_unix(None), None);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("1:00:00"), Some(Duration::from_secs(3600)));
        assert_eq!(
            parse_duration("1-00:00:00"),
            Some(Duration::from_secs(86400))
        );
        assert_eq!(parse_duration("30:00"), Some(Duration::from_secs(1800)));
        assert_eq!(parse_duration("3600"), Some(Duration::from_secs(3600)));
        assert!(parse_duration("UNLIMITED").is_none());
        assert!(parse_duration("1:xx").is_none());
    }

    #[test]
    fn test_parse_duration_overflow() {
        assert!(parse_duration("999999999999999999-00:00:00").is_none());
        assert!(parse_duration("9999999999999999999:00:00").is_none());
        assert!(parse_duration("18446744073709551615:00").is_none());
        assert_eq!(
            parse_duration("18446744073709551615"),
            Some(Duration::from_secs(u64::MAX))
        );
    }

    #[test]
    fn test_minutes_from_duration() {
        assert_eq!(minutes_from_duration(Duration::from_secs(3600)), 60);
        assert_eq!(minutes_from_duration(Duration::from_secs(61)), 2);
        assert_eq!(minutes_from_duration(Duration::ZERO), 0);
    }
}
