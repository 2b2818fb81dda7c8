//! Helpers for reading loosely-typed input values
//!
//! Inputs arrive as [`serde_json::Value`]. The functions here implement the
//! lenient conversions the filters build on: naming a value's type,
//! stringifying scalars, truthiness, numeric-string detection and loose
//! equality.

use std::cmp::Ordering;

use serde_json::{Map, Number, Value};

// ============================================================================
// TYPE INSPECTION
// ============================================================================

/// Name of the value's primitive kind, as used in messages.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// STRING CONVERSION
// ============================================================================

/// Formats a float the way it is shown to users: integral values print
/// without a fraction, magnitudes in `[1e-4, 1e15)` as plain decimals and
/// everything else in exponent form (`1e20`, `1.5e-7`).
#[must_use]
pub fn format_float(f: f64) -> String {
    if f == 0.0 || !f.is_finite() || (1e-4..1e15).contains(&f.abs()) {
        format!("{f}")
    } else {
        format!("{f:e}")
    }
}

/// Stringifies a number.
#[must_use]
pub fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        format_float(n.as_f64().unwrap_or(0.0))
    }
}

/// Truthiness of a value: `null`, `false`, zero, `""`, `"0"` and empty
/// collections are false.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

// ============================================================================
// NUMERIC STRINGS
// ============================================================================

/// A number read out of a value or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// Integral value that fits in `i64`.
    Int(i64),
    /// Anything else.
    Float(f64),
}

impl Numeric {
    /// Reads a JSON number.
    #[must_use]
    pub fn from_number(n: &Number) -> Self {
        match n.as_i64() {
            Some(i) => Numeric::Int(i),
            None => Numeric::Float(n.as_f64().unwrap_or(f64::NAN)),
        }
    }

    /// The value as a float.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }

    /// Numeric comparison; integers compare exactly.
    #[must_use]
    pub fn compare(self, other: Numeric) -> Option<Ordering> {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

/// Parses a numeric string: optional surrounding whitespace, optional sign,
/// digits with an optional `.` fraction (`1.`, `.5` included), optional
/// exponent.
#[must_use]
pub fn numeric_string(s: &str) -> Option<Numeric> {
    let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace());
    let bytes = trimmed.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    let mut integral = true;
    if pos < bytes.len() && bytes[pos] == b'.' {
        integral = false;
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        frac_digits = pos - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        integral = false;
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start {
            return None;
        }
    }

    if pos != bytes.len() {
        return None;
    }

    if integral {
        if let Ok(i) = trimmed.parse::<i64>() {
            return Some(Numeric::Int(i));
        }
    }
    trimmed.parse::<f64>().ok().map(Numeric::Float)
}

// ============================================================================
// LOOSE EQUALITY
// ============================================================================

fn numbers_equal(a: Numeric, b: Numeric) -> bool {
    a.compare(b) == Some(Ordering::Equal)
}

fn number_matches_text(number: &Number, text: &str) -> bool {
    match numeric_string(text) {
        Some(parsed) => numbers_equal(Numeric::from_number(number), parsed),
        None => number_to_string(number) == text,
    }
}

fn strings_equal(lhs: &str, rhs: &str) -> bool {
    match (numeric_string(lhs), numeric_string(rhs)) {
        (Some(lhs), Some(rhs)) => numbers_equal(lhs, rhs),
        _ => lhs == rhs,
    }
}

fn lists_equal(lhs: &[Value], rhs: &[Value]) -> bool {
    lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(a, b)| loose_eq(a, b))
}

fn maps_equal(lhs: &Map<String, Value>, rhs: &Map<String, Value>) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    for (key, item) in lhs {
        match rhs.get(key) {
            Some(other) if loose_eq(item, other) => {}
            _ => return false,
        }
    }
    true
}

/// A list equals a map keyed `"0"`, `"1"`, ... holding the same items.
fn list_matches_map(list: &[Value], map: &Map<String, Value>) -> bool {
    if list.len() != map.len() {
        return false;
    }
    for (index, item) in list.iter().enumerate() {
        match map.get(&index.to_string()) {
            Some(other) if loose_eq(item, other) => {}
            _ => return false,
        }
    }
    true
}

/// Loose (type-juggling) equality.
///
/// - a boolean compares against the other side's truthiness;
/// - `null` equals `""` and anything falsy;
/// - numbers compare numerically, also against numeric strings;
/// - a number against a non-numeric string compares as strings;
/// - two numeric strings compare numerically, other strings byte-wise;
/// - arrays and objects compare entry by entry.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strainer_validator::foundation::value::loose_eq;
///
/// assert!(loose_eq(&json!(1), &json!("1.0")));
/// assert!(loose_eq(&json!(true), &json!("test")));
/// assert!(!loose_eq(&json!(false), &json!(-2)));
/// ```
#[must_use]
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => *flag == truthy(other),
        (Value::Null, Value::String(text)) | (Value::String(text), Value::Null) => text.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !truthy(other),
        (Value::Number(lhs), Value::Number(rhs)) => {
            numbers_equal(Numeric::from_number(lhs), Numeric::from_number(rhs))
        }
        (Value::Number(num), Value::String(text)) | (Value::String(text), Value::Number(num)) => {
            number_matches_text(num, text)
        }
        (Value::String(lhs), Value::String(rhs)) => strings_equal(lhs, rhs),
        (Value::Array(lhs), Value::Array(rhs)) => lists_equal(lhs, rhs),
        (Value::Object(lhs), Value::Object(rhs)) => maps_equal(lhs, rhs),
        (Value::Array(list), Value::Object(map)) | (Value::Object(map), Value::Array(list)) => {
            list_matches_map(list, map)
        }
        _ => false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
