//! Typed field values and raw value coercion
//!
//! Raw dataset values are untyped JSON scalars. Numbers may arrive as
//! strings, booleans as `"true"`/`"false"`, dates as free-form text. The
//! helpers here decide what a raw value *represents*, and [`FieldValue`]
//! carries that interpretation so comparisons never depend on the JSON
//! storage type.

use crate::types::{FieldType, JsonValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashSet;

static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d*(\.\d+)?$").expect("decimal pattern is valid"));

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:-(\d{2}))?$").expect("year pattern is valid"));

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    // 12-hour clock
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %I:%M %p",
    "%B %d, %Y %I:%M %p",
    "%b %d, %Y %I:%M %p",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Whether a raw value counts as "no value": absent, JSON null or `""`.
pub fn is_missing(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => true,
        Some(JsonValue::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Coerce a raw value to a number the way a JavaScript `Number(v)` call does.
///
/// Returns `None` where JavaScript would produce `NaN`. Arrays and objects
/// are never numeric.
pub fn to_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Null => Some(0.0),
        JsonValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => string_to_number(s),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

fn string_to_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Some(0.0);
    }

    match t {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if t.len() > 2 {
        let radix = match t.get(..2) {
            Some("0x" | "0X") => Some(16),
            Some("0o" | "0O") => Some(8),
            Some("0b" | "0B") => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return u64::from_str_radix(&t[2..], radix).ok().map(|n| n as f64);
        }
    }

    // f64::from_str also accepts "inf" and "NaN", which are not numeric literals here
    if !t
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    t.parse::<f64>().ok()
}

/// Whether a number is finite and has no fractional part
pub fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

/// String form of a raw value: strings as-is, everything else as JSON text
pub fn display_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a raw value is a plain decimal number (no exponent, no separators)
pub fn is_plain_decimal(value: &JsonValue) -> bool {
    to_number(value).is_some() && DECIMAL_RE.is_match(&display_string(value))
}

/// Interpret a raw value as a boolean: native booleans and `"true"`/`"false"`
pub fn as_boolean(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) if s == "true" => Some(true),
        JsonValue::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

/// Parse a calendar date or date-time from free-form text.
///
/// Offset-aware inputs are converted to UTC. Date-only inputs resolve to
/// midnight; a bare year or year-month resolves to the first day.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(t) {
        return Some(dt.naive_utc());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(t, fmt) {
            return Some(dt.naive_utc());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    let caps = YEAR_RE.captures(t)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

/// Whether a raw value parses as a date
pub fn is_date(value: &JsonValue) -> bool {
    match value {
        JsonValue::String(s) => parse_date(s).is_some(),
        _ => false,
    }
}

/// Distinct present values in first-occurrence order.
///
/// Missing values (see [`is_missing`]) are skipped. Values are distinct by
/// their JSON form, so `"1"` and `1` are different values.
pub fn distinct_present<'a, I>(values: I) -> Vec<&'a JsonValue>
where
    I: IntoIterator<Item = Option<&'a JsonValue>>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| !is_missing(*v))
        .flatten()
        .filter(|v| seen.insert(v.to_string()))
        .collect()
}

/// A raw value interpreted under a field's inferred type
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDateTime),
}

impl FieldValue {
    /// Interpret `raw` as a value of type `field_type`.
    ///
    /// Values that do not fit the type fall back to their text form, so
    /// this never fails. An empty string is `Null` unless the type is
    /// textual.
    pub fn from_raw(raw: &JsonValue, field_type: FieldType) -> Self {
        match raw {
            JsonValue::Null => return FieldValue::Null,
            JsonValue::String(s) if s.is_empty() => {
                return if field_type.is_textual() {
                    FieldValue::Text(String::new())
                } else {
                    FieldValue::Null
                };
            }
            _ => {}
        }

        let typed = match field_type {
            FieldType::Boolean => as_boolean(raw).map(FieldValue::Boolean),
            FieldType::Integer => to_number(raw)
                .filter(|n| is_integral(*n))
                .map(FieldValue::from_number),
            FieldType::Float => to_number(raw).map(FieldValue::Float),
            FieldType::Date => match raw {
                JsonValue::String(s) => parse_date(s).map(FieldValue::Date),
                _ => None,
            },
            FieldType::Option | FieldType::Text => None,
        };

        typed.unwrap_or_else(|| FieldValue::Text(display_string(raw)))
    }

    fn from_number(n: f64) -> Self {
        if n >= i64::MIN as f64 && n < i64::MAX as f64 {
            FieldValue::Integer(n as i64)
        } else {
            FieldValue::Float(n)
        }
    }

    /// Check if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Compare two values of compatible types.
    ///
    /// Integers and floats compare numerically. `Null` only equals `Null`.
    /// Returns `None` for incompatible pairs.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        use FieldValue::{Boolean, Date, Float, Integer, Null, Text};

        match (self, other) {
            (Null, Null) => Some(Ordering::Equal),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Text(a), Text(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total order used for sorting: compatible values by [`compare`](Self::compare),
    /// otherwise by kind, with `Null` after everything else.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match self.compare(other) {
            Some(ordering) => ordering,
            None => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Boolean(_) => 0,
            FieldValue::Integer(_) | FieldValue::Float(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Null => 4,
        }
    }
}
