//! Forgiving field decoders for activity payloads
//!
//! The backend (and hand-edited exports) send amounts as numbers or
//! strings, dates with or without a time part, and ids as integers.
//! None of these decoders fail: anything they cannot make sense of
//! becomes the field's neutral value.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Decode an amount; non-numeric, null and missing values become zero
pub fn amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(coerce_amount(&value))
}

/// Decode a calendar date; unparseable values become `None`
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match &value {
        JsonValue::String(s) => {
            let parsed = parse_date(s);
            if parsed.is_none() && !s.trim().is_empty() {
                log::debug!("Ignoring unparseable date {:?}", s);
            }
            parsed
        }
        _ => None,
    })
}

/// Decode an optional flag (`true`, `false`, `"true"`, `"false"`, null)
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Bool(b) => Some(b),
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        JsonValue::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    })
}

/// Decode an identifier given as either an integer or a string
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) => s,
        JsonValue::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Decode an optional free-text field; numbers are stringified
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Coerce any JSON value to a decimal amount
pub fn coerce_amount(value: &JsonValue) -> Decimal {
    let parsed = match value {
        JsonValue::Number(n) => parse_amount(&n.to_string()),
        JsonValue::String(s) => parse_amount(s),
        _ => None,
    };

    match parsed {
        Some(amount) => amount,
        None => {
            if !value.is_null() {
                log::debug!("Coercing non-numeric amount {} to 0", value);
            }
            Decimal::ZERO
        }
    }
}

/// Currency symbols and codes a formatted amount may start with
const CURRENCY_PREFIXES: [&str; 10] = ["USD", "PKR", "CNY", "EUR", "GBP", "Rs", "$", "¥", "€", "£"];

/// Parse an amount string
///
/// Accepts plain and scientific notation, and formatted amounts: an
/// optional currency prefix, thousands separators and accounting
/// parentheses for negatives. Anything else is not an amount.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(amount) = Decimal::from_str(s) {
        return Some(amount);
    }
    if let Ok(amount) = Decimal::from_scientific(s) {
        return Some(amount);
    }
    parse_formatted_amount(s)
}

fn parse_formatted_amount(s: &str) -> Option<Decimal> {
    let (parenthesized, s) = match s.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => (false, s),
    };
    let (leading_minus, s) = split_minus(s);
    let (inner_minus, s) = split_minus(strip_currency(s));
    if leading_minus && inner_minus {
        return None;
    }

    let amount = Decimal::from_str(&strip_thousands(s)?).ok()?;
    if parenthesized || leading_minus || inner_minus {
        Some(-amount.abs())
    } else {
        Some(amount)
    }
}

fn split_minus(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, s),
    }
}

fn strip_currency(s: &str) -> &str {
    for prefix in CURRENCY_PREFIXES {
        let matched = s
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if matched {
            let rest = &s[prefix.len()..];
            // "Rs. 1,250" abbreviates with a dot; "$.50" does not
            let rest = if prefix.chars().all(|c| c.is_ascii_alphabetic()) {
                rest.strip_prefix('.').unwrap_or(rest)
            } else {
                rest
            };
            return rest.trim_start();
        }
    }
    s
}

/// Digits with well-formed comma grouping (`1,250.00`, `1,25,000`), commas removed
fn strip_thousands(s: &str) -> Option<String> {
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());

    if fraction.is_some_and(|f| !all_digits(f)) {
        return None;
    }

    let groups: Vec<&str> = whole.split(',').collect();
    if !groups.iter().all(|g| all_digits(*g)) {
        return None;
    }
    if let [first, middle @ .., last] = groups.as_slice() {
        let grouped = first.len() <= 3
            && last.len() == 3
            && middle.iter().all(|g| g.len() == 2 || g.len() == 3);
        if !grouped {
            return None;
        }
    }

    let mut digits = groups.concat();
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }
    Some(digits)
}

/// Parse a date, with or without a time component
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}
