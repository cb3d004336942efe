//! Time and date utilities.
//!
//! Conversions between UTC and the fixed regional civil calendar used for
//! schedule decisions, plus the parser for the upstream feed's heterogeneous
//! timestamp formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Fixed timestamp patterns accepted from the upstream feed.
///
/// The feed mixes several formats across rows; every pattern here must be
/// tried before a value is given up on. An unparseable timestamp degrades to
/// `None` rather than failing the row or the sync.
static FEED_TIMESTAMP_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses an upstream feed timestamp, trying RFC 3339 first and then each
/// fixed pattern. Returns `None` for anything unrecognized.
pub fn parse_feed_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }

    FEED_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Converts a local civil date + hour to the UTC instant it names.
///
/// Returns `None` when the wall-clock time does not exist in the zone (the
/// daylight-saving spring-forward gap); ambiguous times resolve to the
/// earlier instant.
pub fn local_hour_to_utc(timezone: Tz, date: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
    let local = date.and_hms_opt(hour, 0, 0)?;
    timezone
        .from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::Australia;

    mod parse_feed_timestamp {
        use super::*;

        #[test]
        fn accepts_slash_delimited_format() {
            let parsed = parse_feed_timestamp("02/06/2026 14:05:30").unwrap();
            assert_eq!(
                parsed,
                NaiveDate::from_ymd_opt(2026, 6, 2)
                    .unwrap()
                    .and_hms_opt(14, 5, 30)
                    .unwrap()
            );
        }

        #[test]
        fn accepts_iso_format() {
            let parsed = parse_feed_timestamp("2026-06-02 14:05:30").unwrap();
            assert_eq!(
                parsed,
                NaiveDate::from_ymd_opt(2026, 6, 2)
                    .unwrap()
                    .and_hms_opt(14, 5, 30)
                    .unwrap()
            );
        }

        #[test]
        fn accepts_rfc3339() {
            let parsed = parse_feed_timestamp("2026-06-02T14:05:30+10:00").unwrap();
            assert_eq!(
                parsed,
                NaiveDate::from_ymd_opt(2026, 6, 2)
                    .unwrap()
                    .and_hms_opt(4, 5, 30)
                    .unwrap()
            );
        }

        #[test]
        fn unparseable_yields_none() {
            assert!(parse_feed_timestamp("not a date").is_none());
            assert!(parse_feed_timestamp("").is_none());
            assert!(parse_feed_timestamp("31/31/2026 99:00:00").is_none());
        }
    }

    mod local_hour_to_utc {
        use super::*;

        #[test]
        fn converts_standard_time() {
            // Sydney is UTC+10 outside daylight saving.
            let utc = local_hour_to_utc(
                Australia::Sydney,
                NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
                8,
            )
            .unwrap();
            assert_eq!(utc.naive_utc().to_string(), "2026-06-14 22:00:00");
        }

        #[test]
        fn spring_forward_gap_yields_none() {
            // 2026-10-04 02:00 does not exist in Sydney; clocks jump 02:00 -> 03:00.
            let utc = local_hour_to_utc(
                Australia::Sydney,
                NaiveDate::from_ymd_opt(2026, 10, 4).unwrap(),
                2,
            );
            assert!(utc.is_none());
        }
    }
}
