//! Cell parsing helpers shared by the catalog and the ledger.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Coerce an ordering-attribute cell to a non-negative integer.
///
/// Integers parse directly. Finite non-negative floats (`"2020.0"` from
/// spreadsheet exports) are truncated. Everything else is `0`.
#[must_use]
pub fn coerce_attribute(raw: Option<&str>) -> u64 {
    let Some(raw) = raw.map(str::trim) else {
        return 0;
    };
    if let Ok(n) = raw.parse::<u64>() {
        return n;
    }
    match raw.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(f) if f.is_finite() && f >= 0.0 => f as u64,
        _ => 0,
    }
}

/// Parse a stored evaluation timestamp.
///
/// Handles both RFC 3339 (`"2026-10-18T09:00:00+00:00"`) and the plain
/// `"2026-10-18 09:00:00"` form older sheets contain.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render a timestamp the way it is stored.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("2020"), 2020)]
    #[case(Some(" 15 "), 15)]
    #[case(Some("2020.0"), 2020)]
    #[case(Some("7.9"), 7)]
    #[case(Some("-3"), 0)]
    #[case(Some("n/a"), 0)]
    #[case(Some("NaN"), 0)]
    #[case(Some("inf"), 0)]
    #[case(None, 0)]
    fn coercion(#[case] raw: Option<&str>, #[case] expected: u64) {
        assert_eq!(coerce_attribute(raw), expected);
    }

    #[test]
    fn parses_both_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2026-10-18T09:30:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-18T11:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-18 09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("18/10/2026"), None);
    }

    #[test]
    fn format_roundtrips_through_parse() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
            .and_utc();
        let text = format_timestamp(at);
        assert_eq!(text, "2026-01-02T03:04:05+00:00");
        assert_eq!(parse_timestamp(&text), Some(at));
    }
}
