// Rust guideline compliant 2026-10-18

//! Pluggable per-field type converters.
//!
//! A converter moves a value between three representations:
//! - external input → internal (`to_internal`, applied on set)
//! - internal → display (`to_display`, applied on read in view modes)
//! - internal → storage (`to_storage`, applied on read in model mode)
//!
//! Conversion is total: every function returns a value and never fails.
//! Only `validate` can reject a value.

mod date;
mod number;
pub mod parse;
mod string;

pub use date::{DateTimeType, DateType};
pub use number::NumberType;
pub use string::StringType;

use crate::registry::Context;
use crate::{FieldSpec, Value};
use std::fmt;
use std::sync::Arc;

/// Strategy implementing conversion and validation for one semantic type.
pub trait TypeConverter: fmt::Debug + Send + Sync {
    /// Returns the registry key for this converter.
    fn name(&self) -> &str;

    /// Validates a model-mode value, returning failure messages.
    ///
    /// An empty list means the value is valid.
    fn validate(&self, value: &Value, display_name: &str, spec: &FieldSpec) -> Vec<String>;

    /// Converts an internal value into its human-readable form.
    fn to_display(&self, value: &Value) -> Value;

    /// Converts external input into the internal representation.
    fn to_internal(&self, value: Value) -> Value;

    /// Converts an internal value into the form handed to persistence.
    fn to_storage(&self, value: &Value) -> Value;
}

/// Constructs a converter for the active request context.
pub type ConverterProvider = Arc<dyn Fn(&Context) -> Arc<dyn TypeConverter> + Send + Sync>;

/// Returns the framework converters keyed by class name.
pub(crate) fn builtin_providers() -> Vec<(&'static str, ConverterProvider)> {
    vec![
        (
            "StringType",
            Arc::new(|_: &Context| Arc::new(StringType) as Arc<dyn TypeConverter>),
        ),
        (
            "NumberType",
            Arc::new(|_: &Context| Arc::new(NumberType) as Arc<dyn TypeConverter>),
        ),
        (
            "DateType",
            Arc::new(|ctx: &Context| Arc::new(DateType::new(ctx.clone())) as Arc<dyn TypeConverter>),
        ),
        (
            "DateTimeType",
            Arc::new(|ctx: &Context| {
                Arc::new(DateTimeType::new(ctx.clone())) as Arc<dyn TypeConverter>
            }),
        ),
    ]
}
