// Rust guideline compliant 2026-10-18

//! Per-field declarations consumed by type converters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type name used when neither the field nor the defaults name one.
pub const DEFAULT_TYPE: &str = "string";

/// Declared metadata for a single value object field.
///
/// Unknown keys are kept in `extra` and passed through to the converter's
/// `validate`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Registered type name (`string`, `number`, `date`, `datetime`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Human-readable name used in validation messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dname: Option<String>,
    /// Maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<usize>,
    /// Additional converter-specific options.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FieldSpec {
    /// Creates a spec for the given type name.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// Object-wide defaults applied to every field.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(DEFAULT_TYPE)
    }

    /// Shorthand for a `string` field.
    #[must_use]
    pub fn string() -> Self {
        Self::new("string")
    }

    /// Shorthand for a `number` field.
    #[must_use]
    pub fn number() -> Self {
        Self::new("number")
    }

    /// Shorthand for a `date` field.
    #[must_use]
    pub fn date() -> Self {
        Self::new("date")
    }

    /// Shorthand for a `datetime` field.
    #[must_use]
    pub fn datetime() -> Self {
        Self::new("datetime")
    }

    /// Builder: set the display name.
    #[must_use]
    pub fn dname(mut self, dname: impl Into<String>) -> Self {
        self.dname = Some(dname.into());
        self
    }

    /// Builder: set the maximum length.
    #[must_use]
    pub fn maxlength(mut self, maxlength: usize) -> Self {
        self.maxlength = Some(maxlength);
        self
    }

    /// Builder: add a converter-specific option.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Merges this spec over `defaults`; keys present here win.
    #[must_use]
    pub fn merged(&self, defaults: &FieldSpec) -> FieldSpec {
        let mut extra = defaults.extra.clone();
        extra.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        FieldSpec {
            type_name: self.type_name.clone().or_else(|| defaults.type_name.clone()),
            dname: self.dname.clone().or_else(|| defaults.dname.clone()),
            maxlength: self.maxlength.or(defaults.maxlength),
            extra,
        }
    }

    /// Returns the type name, falling back to `string`.
    #[must_use]
    pub fn type_or_default(&self) -> &str {
        self.type_name.as_deref().unwrap_or(DEFAULT_TYPE)
    }

    /// Returns the display name, falling back to the field name.
    #[must_use]
    pub fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.dname.as_deref().unwrap_or(field)
    }
}
