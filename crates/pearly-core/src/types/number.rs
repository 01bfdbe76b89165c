// Rust guideline compliant 2026-10-18

use super::TypeConverter;
use crate::{FieldSpec, Value};

/// Integer converter.
///
/// Input is truncated to an integer the way loosely typed form input is:
/// the leading numeric prefix of text is used, anything else becomes `0`.
/// Unlike the date converters there is no null guard, so `Null` and `""`
/// are stored as `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberType;

impl TypeConverter for NumberType {
    fn name(&self) -> &str {
        "number"
    }

    // No numeric validation exists yet; `min`/`max` spec keys are ignored.
    fn validate(&self, _value: &Value, _display_name: &str, _spec: &FieldSpec) -> Vec<String> {
        Vec::new()
    }

    fn to_display(&self, value: &Value) -> Value {
        value.clone()
    }

    fn to_internal(&self, value: Value) -> Value {
        Value::Int(truncate_to_int(&value))
    }

    fn to_storage(&self, value: &Value) -> Value {
        value.clone()
    }
}

/// Coerces any value into an integer, truncating toward zero.
pub(crate) fn truncate_to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Int(n) => *n,
        // `as` saturates and maps NaN to 0.
        Value::Float(f) => f.trunc() as i64,
        Value::Text(text) => leading_int(text),
    }
}

/// Parses the leading numeric prefix of `text`.
fn leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_end = end;

    let mut fractional = false;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut cursor = end + 1;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > end + 1 || int_end > digits_start {
            fractional = true;
            end = cursor;
        }
    }

    if int_end == digits_start && !fractional {
        return 0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exp_digits = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_digits {
            fractional = true;
            end = cursor;
        }
    }

    let prefix = &text[..end];
    if fractional {
        return prefix.parse::<f64>().map_or(0, |f| f.trunc() as i64);
    }

    prefix.parse::<i64>().unwrap_or_else(|_| {
        if prefix.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_prefix() {
        assert_eq!(leading_int("42"), 42);
        assert_eq!(leading_int("  -17abc"), -17);
        assert_eq!(leading_int("7.9"), 7);
        assert_eq!(leading_int("-7.9"), -7);
        assert_eq!(leading_int(".5"), 0);
        assert_eq!(leading_int("1e3"), 1000);
        assert_eq!(leading_int("12e"), 12);
        assert_eq!(leading_int("abc"), 0);
        assert_eq!(leading_int("+"), 0);
        assert_eq!(leading_int(""), 0);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(leading_int("99999999999999999999"), i64::MAX);
        assert_eq!(leading_int("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_float_and_bool_input() {
        assert_eq!(truncate_to_int(&Value::Float(-3.99)), -3);
        assert_eq!(truncate_to_int(&Value::Float(f64::NAN)), 0);
        assert_eq!(truncate_to_int(&Value::Bool(true)), 1);
    }
}
