// Rust guideline compliant 2026-10-18

use super::parse::parse_timestamp;
use super::TypeConverter;
use crate::registry::Context;
use crate::{FieldSpec, Value};
use chrono::{DateTime, Locale, Utc};

const ISO_DATE: &str = "%Y-%m-%d";
const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S%z";
const PLAIN_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Calendar date converter.
///
/// Internally a date is Unix epoch seconds (UTC). Storage form is
/// `YYYY-MM-DD`; display form is the same unless a locale is configured
/// and ISO-8601 output is not requested.
#[derive(Debug, Clone)]
pub struct DateType {
    context: Context,
}

impl DateType {
    /// Creates a date converter bound to the request context.
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self { context }
    }
}

impl TypeConverter for DateType {
    fn name(&self) -> &str {
        "date"
    }

    fn validate(&self, _value: &Value, _display_name: &str, _spec: &FieldSpec) -> Vec<String> {
        Vec::new()
    }

    fn to_display(&self, value: &Value) -> Value {
        render(value, |dt| match display_locale(&self.context) {
            Some(locale) => dt.format_localized("%x", locale).to_string(),
            None => dt.format(ISO_DATE).to_string(),
        })
    }

    fn to_internal(&self, value: Value) -> Value {
        to_epoch(value)
    }

    fn to_storage(&self, value: &Value) -> Value {
        render(value, |dt| dt.format(ISO_DATE).to_string())
    }
}

/// Date and time converter.
///
/// Storage form is ISO-8601 with a numeric offset
/// (`YYYY-MM-DDThh:mm:ss+0000`). Display uses the same form when ISO-8601
/// output is requested, the locale's short date and medium time when a
/// locale is configured, and `YYYY-MM-DD hh:mm:ss` otherwise.
#[derive(Debug, Clone)]
pub struct DateTimeType {
    context: Context,
}

impl DateTimeType {
    /// Creates a date-time converter bound to the request context.
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self { context }
    }
}

impl TypeConverter for DateTimeType {
    fn name(&self) -> &str {
        "datetime"
    }

    fn validate(&self, _value: &Value, _display_name: &str, _spec: &FieldSpec) -> Vec<String> {
        Vec::new()
    }

    fn to_display(&self, value: &Value) -> Value {
        render(value, |dt| {
            if self.context.iso8601 {
                return dt.format(ISO_DATETIME).to_string();
            }
            match display_locale(&self.context) {
                Some(locale) => dt.format_localized("%x %X", locale).to_string(),
                None => dt.format(PLAIN_DATETIME).to_string(),
            }
        })
    }

    fn to_internal(&self, value: Value) -> Value {
        to_epoch(value)
    }

    fn to_storage(&self, value: &Value) -> Value {
        render(value, |dt| dt.format(ISO_DATETIME).to_string())
    }
}

/// Locale used for display, or `None` for ISO output.
fn display_locale(context: &Context) -> Option<Locale> {
    if context.iso8601 {
        return None;
    }
    let locale = context.locale.as_deref()?.replace('-', "_");
    Locale::try_from(locale.as_str()).ok()
}

/// Free-form input to epoch seconds; blank and unparseable input become `Null`.
fn to_epoch(value: Value) -> Value {
    match value {
        Value::Null | Value::Bool(_) => Value::Null,
        Value::Int(n) => Value::Int(n),
        Value::Float(f) => Value::Int(f.trunc() as i64),
        Value::Text(text) => {
            if text.trim().is_empty() {
                return Value::Null;
            }
            parse_timestamp(&text, Utc::now()).map_or(Value::Null, Value::Int)
        }
    }
}

/// Formats an epoch value; blank values become `Null`, non-epoch values pass
/// through unchanged.
fn render(value: &Value, format: impl Fn(DateTime<Utc>) -> String) -> Value {
    if value.is_blank() {
        return Value::Null;
    }
    let epoch = match value {
        Value::Int(n) => *n,
        Value::Float(f) => f.trunc() as i64,
        _ => return value.clone(),
    };
    match DateTime::from_timestamp(epoch, 0) {
        Some(dt) => Value::Text(format(dt)),
        None => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(locale: Option<&str>, iso8601: bool) -> Context {
        Context {
            locale: locale.map(str::to_string),
            iso8601,
            ..Context::default()
        }
    }

    #[test]
    fn test_date_storage_round_trip() {
        let date = DateType::new(Context::default());
        let internal = date.to_internal(Value::from("2024-03-15"));
        assert_eq!(date.to_storage(&internal), Value::from("2024-03-15"));
    }

    #[test]
    fn test_blank_input_is_null() {
        let date = DateType::new(Context::default());
        assert_eq!(date.to_internal(Value::Null), Value::Null);
        assert_eq!(date.to_internal(Value::from("")), Value::Null);
        assert_eq!(date.to_internal(Value::from("   ")), Value::Null);
        assert_eq!(date.to_display(&Value::Null), Value::Null);
        assert_eq!(date.to_storage(&Value::from("")), Value::Null);
    }

    #[test]
    fn test_unparseable_input_is_null() {
        let date = DateType::new(Context::default());
        assert_eq!(date.to_internal(Value::from("sometime soon")), Value::Null);
    }

    #[test]
    fn test_localized_date_display() {
        let date = DateType::new(context(Some("de_DE"), false));
        let internal = date.to_internal(Value::from("2024-03-15"));
        let display = date.to_display(&internal).to_text();
        assert_ne!(display, "2024-03-15");
        assert!(display.contains("15"), "got {display}");
    }

    #[test]
    fn test_iso_flag_overrides_locale() {
        let date = DateType::new(context(Some("de_DE"), true));
        let internal = date.to_internal(Value::from("2024-03-15"));
        assert_eq!(date.to_display(&internal), Value::from("2024-03-15"));
    }

    #[test]
    fn test_unknown_locale_falls_back_to_iso() {
        let date = DateType::new(context(Some("xx_YY"), false));
        let internal = date.to_internal(Value::from("2024-03-15"));
        assert_eq!(date.to_display(&internal), Value::from("2024-03-15"));
    }

    #[test]
    fn test_datetime_storage_is_iso8601() {
        let datetime = DateTimeType::new(Context::default());
        let internal = datetime.to_internal(Value::from("2024-03-15 14:30:00"));
        assert_eq!(
            datetime.to_storage(&internal),
            Value::from("2024-03-15T14:30:00+0000")
        );
        assert_eq!(
            datetime.to_display(&internal),
            Value::from("2024-03-15 14:30:00")
        );
    }

    #[test]
    fn test_datetime_iso_display() {
        let datetime = DateTimeType::new(context(None, true));
        let internal = datetime.to_internal(Value::from("2024-03-15T14:30:00Z"));
        assert_eq!(
            datetime.to_display(&internal),
            Value::from("2024-03-15T14:30:00+0000")
        );
    }

    #[test]
    fn test_non_epoch_passes_through_render() {
        let date = DateType::new(Context::default());
        assert_eq!(date.to_storage(&Value::from("raw")), Value::from("raw"));
    }
}
