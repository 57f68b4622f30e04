//! Read-side coercion for leaves.
//!
//! Freshly initialized leaves hold `""` regardless of their declared kind,
//! so numeric and boolean widgets coerce on read. User input that fails to
//! parse as a number is stored as `0`.

use crate::types::SheetValue;

/// Parse numeric user input: integer first, then float. Anything else,
/// including blank input, becomes `0`.
pub fn parse_number(input: &str) -> SheetValue {
    let trimmed = input.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return SheetValue::Integer(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => SheetValue::Float(value),
        _ => SheetValue::Integer(0),
    }
}

/// Numeric view of any leaf. Numbers as-is, numeric strings parsed,
/// booleans as 1/0, everything else 0.
pub fn as_number(value: &SheetValue) -> f64 {
    match value {
        SheetValue::Integer(value) => *value as f64,
        SheetValue::Float(value) => *value,
        SheetValue::Boolean(value) => f64::from(u8::from(*value)),
        SheetValue::String(text) => parse_number(text).as_f64().unwrap_or_default(),
        SheetValue::Null | SheetValue::List(_) | SheetValue::Object(_) => 0.0,
    }
}

/// Store an `f64` as an integer when it has no fractional part.
pub fn number_value(value: f64) -> SheetValue {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        SheetValue::Integer(value as i64)
    } else {
        SheetValue::Float(value)
    }
}

/// Boolean view of any leaf: `true`, non-zero numbers and the string
/// `"true"`.
pub fn as_flag(value: &SheetValue) -> bool {
    match value {
        SheetValue::Boolean(value) => *value,
        SheetValue::Integer(value) => *value != 0,
        SheetValue::Float(value) => *value != 0.0,
        SheetValue::String(text) => text.trim().eq_ignore_ascii_case("true"),
        SheetValue::Null | SheetValue::List(_) | SheetValue::Object(_) => false,
    }
}
