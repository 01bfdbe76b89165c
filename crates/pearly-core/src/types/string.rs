// Rust guideline compliant 2026-10-18

use super::TypeConverter;
use crate::{FieldSpec, Value};

/// Text converter; the registry's fallback for unknown type names.
///
/// Conversions are identity. Validation enforces `maxlength`, counted in
/// characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl TypeConverter for StringType {
    fn name(&self) -> &str {
        "string"
    }

    fn validate(&self, value: &Value, display_name: &str, spec: &FieldSpec) -> Vec<String> {
        let mut messages = Vec::new();
        if let Some(maxlength) = spec.maxlength {
            if value.to_text().chars().count() > maxlength {
                messages.push(format!(
                    "Length of '{display_name}' is greater than maximum allowed length of '{maxlength}'"
                ));
            }
        }
        messages
    }

    fn to_display(&self, value: &Value) -> Value {
        value.clone()
    }

    fn to_internal(&self, value: Value) -> Value {
        value
    }

    fn to_storage(&self, value: &Value) -> Value {
        value.clone()
    }
}
