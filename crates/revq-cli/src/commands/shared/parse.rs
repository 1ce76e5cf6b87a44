use std::collections::BTreeMap;

use anyhow::Context;
use chrono::NaiveDate;
use revq_engine::{AttributeRange, RangeFilter};

/// Parse repeated `ATTR=MIN:MAX` flags. Either bound may be left empty.
pub fn parse_ranges(raw: &[String]) -> anyhow::Result<RangeFilter> {
    let mut ranges = RangeFilter::new();
    for entry in raw {
        let (attribute, bounds) = entry
            .split_once('=')
            .with_context(|| format!("invalid range '{entry}': expected ATTR=MIN:MAX"))?;
        let attribute = attribute.trim();
        if attribute.is_empty() {
            anyhow::bail!("invalid range '{entry}': attribute name is empty");
        }
        let (min, max) = bounds
            .split_once(':')
            .with_context(|| format!("invalid range '{entry}': expected MIN:MAX"))?;

        let min = parse_bound(min, 0, entry)?;
        let max = parse_bound(max, u64::MAX, entry)?;
        ranges.insert(attribute.to_string(), AttributeRange::new(min, max));
    }
    Ok(ranges)
}

fn parse_bound(raw: &str, default: u64, entry: &str) -> anyhow::Result<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse::<u64>()
        .map_err(|error| anyhow::anyhow!("invalid range '{entry}': bound '{raw}': {error}"))
}

/// Parse repeated `N=OPTION` flags into selections keyed by aspect position.
pub fn parse_answers(raw: &[String]) -> anyhow::Result<BTreeMap<usize, String>> {
    let mut selections = BTreeMap::new();
    for entry in raw {
        let (position, value) = entry
            .split_once('=')
            .with_context(|| format!("invalid answer '{entry}': expected N=OPTION"))?;
        let position = position
            .trim()
            .parse::<usize>()
            .map_err(|error| anyhow::anyhow!("invalid answer '{entry}': aspect number: {error}"))?;
        if selections.insert(position, value.trim().to_string()).is_some() {
            anyhow::bail!("aspect {position} answered more than once");
        }
    }
    Ok(selections)
}

/// Parse a `YYYY-MM-DD` day.
pub fn parse_day(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid day '{raw}': expected YYYY-MM-DD ({error})"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use revq_engine::AttributeRange;

    use super::{parse_answers, parse_day, parse_ranges};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn ranges_accept_open_bounds() {
        let ranges = parse_ranges(&strings(&["Year=2019:2020", "Citations=5:", "Pages=:10"]))
            .expect("ranges should parse");

        assert_eq!(ranges["Year"], AttributeRange::new(2019, 2020));
        assert_eq!(ranges["Citations"], AttributeRange::new(5, u64::MAX));
        assert_eq!(ranges["Pages"], AttributeRange::new(0, 10));
    }

    #[test]
    fn later_range_replaces_earlier() {
        let ranges =
            parse_ranges(&strings(&["Year=1:2", "Year=3:4"])).expect("ranges should parse");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges["Year"], AttributeRange::new(3, 4));
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        for bad in ["Year", "Year=2020", "=1:2", "Year=a:2", "Year=-1:2"] {
            assert!(parse_ranges(&strings(&[bad])).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn answers_key_by_position() {
        let answers =
            parse_answers(&strings(&["2=3", "1=4 - High"])).expect("answers should parse");
        assert_eq!(answers[&1], "4 - High");
        assert_eq!(answers[&2], "3");
    }

    #[test]
    fn duplicate_answer_is_an_error() {
        let err = parse_answers(&strings(&["1=1", "1=2"])).expect_err("should fail");
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn day_parses_iso_date() {
        assert_eq!(
            parse_day("2024-03-05").expect("day should parse"),
            NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
        );
        assert!(parse_day("05/03/2024").is_err());
    }
}
