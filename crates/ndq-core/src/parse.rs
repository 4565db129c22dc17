//! Scalar parsing for vendor strings such as `"$1,234.56"`, `"-0.73%"` or
//! `"50.00 - 75.00"`.
//!
//! Nothing here fails: unparseable input is `None`.

use serde_json::Value;

use crate::PriceRange;

/// Vendor tokens meaning "no value".
const SENTINELS: [&str; 6] = ["", "N/A", "NA", "-", "--", "null"];

fn is_sentinel(value: &str) -> bool {
    SENTINELS
        .iter()
        .any(|sentinel| sentinel.eq_ignore_ascii_case(value))
}

/// Parse a decimal, ignoring `$` markers, `,` separators and a trailing `%`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if is_sentinel(trimmed) {
        return None;
    }

    let cleaned = trimmed
        .chars()
        .filter(|ch| !matches!(ch, '$' | ','))
        .collect::<String>();
    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_suffix('%').unwrap_or(cleaned).trim_end();

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Human percentage to decimal fraction: `"12.3%"` is `0.123`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    parse_number(raw).map(|value| value / 100.0)
}

/// Share counts and volumes, truncated toward zero.
pub fn parse_volume(raw: &str) -> Option<i64> {
    parse_number(raw).and_then(truncate)
}

/// Split `"<low> - <high>"`. Anything other than exactly two parts is `None`.
pub fn parse_range(raw: &str) -> Option<PriceRange> {
    let trimmed = raw.trim();
    if is_sentinel(trimmed) {
        return None;
    }

    let mut parts = trimmed.split('-').map(str::trim);
    let (Some(low), Some(high), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };

    Some(PriceRange {
        low: parse_number(low),
        high: parse_number(high),
    })
}

/// [`parse_number`] over a JSON value. Numbers pass through unchanged.
pub fn number_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::String(raw) => parse_number(raw),
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        _ => None,
    }
}

/// [`parse_percentage`] over a JSON value. Numbers are still divided by 100.
pub fn percentage_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::String(raw) => parse_percentage(raw),
        Value::Number(number) => number.as_f64().map(|value| value / 100.0),
        _ => None,
    }
}

/// [`parse_volume`] over a JSON value.
pub fn volume_value(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::String(raw) => parse_volume(raw),
        Value::Number(number) => number.as_i64().or_else(|| number.as_f64().and_then(truncate)),
        _ => None,
    }
}

/// [`parse_range`] over a JSON value.
pub fn range_value(value: Option<&Value>) -> Option<PriceRange> {
    value.and_then(Value::as_str).and_then(parse_range)
}

/// Owned string for string-typed JSON values; other types are `None`.
pub fn text_value(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

pub fn bool_value(value: Option<&Value>) -> Option<bool> {
    value.and_then(Value::as_bool)
}

fn truncate(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    // i64::MAX is not exactly representable; the comparison bound is 2^63.
    (truncated >= i64::MIN as f64 && truncated < i64::MAX as f64).then_some(truncated as i64)
}
