// Rust guideline compliant 2026-10-18

//! Output formatting module for the Pearly CLI.
//!
//! This module renders value objects, validation messages, dirty sets and
//! type resolutions as tables or JSON.

use indexmap::IndexMap;
use pearly_core::{Mode, Value};
use serde::Serialize;
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

/// How one requested type name resolved in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeResolution {
    /// Name asked for.
    pub requested: String,
    /// Name of the converter returned.
    pub resolved: String,
    /// Class path the converter was resolved from, if it came from one.
    pub class_path: Option<String>,
}

impl TypeResolution {
    /// Returns true if the request fell back to the string converter.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.class_path.is_none() && self.requested != self.resolved
    }
}

/// Output formatter trait.
pub trait OutputFormatter {
    /// Formats the fields of a value object read through `mode`.
    fn format_record(&self, schema: &str, mode: Mode, values: &[(String, Value)]) -> String;

    /// Formats a failed validation.
    fn format_validation(&self, schema: &str, messages: &[String]) -> String;

    /// Formats the dirty fields of a value object.
    fn format_dirty(&self, schema: &str, dirty: &IndexMap<String, Value>) -> String;

    /// Formats type resolutions.
    fn format_types(&self, types: &[TypeResolution]) -> String;

    /// Formats an error message for display.
    fn format_error(&self, error: &str) -> String;
}

#[derive(Serialize)]
struct RecordEnvelope<'a> {
    schema: &'a str,
    valid: bool,
    mode: Mode,
    values: IndexMap<&'a str, &'a Value>,
}

#[derive(Serialize)]
struct ValidationEnvelope<'a> {
    schema: &'a str,
    valid: bool,
    messages: &'a [String],
}

#[derive(Serialize)]
struct DirtyEnvelope<'a> {
    schema: &'a str,
    dirty: &'a IndexMap<String, Value>,
    total: usize,
}

#[derive(Serialize)]
struct TypesEnvelope<'a> {
    types: &'a [TypeResolution],
    total: usize,
}

/// JSON output formatter.
///
/// Formats output as valid JSON for machine consumption. Field order is
/// preserved.
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize output" }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_record(&self, schema: &str, mode: Mode, values: &[(String, Value)]) -> String {
        Self::render(&RecordEnvelope {
            schema,
            valid: true,
            mode,
            values: values
                .iter()
                .map(|(name, value)| (name.as_str(), value))
                .collect(),
        })
    }

    fn format_validation(&self, schema: &str, messages: &[String]) -> String {
        Self::render(&ValidationEnvelope {
            schema,
            valid: false,
            messages,
        })
    }

    fn format_dirty(&self, schema: &str, dirty: &IndexMap<String, Value>) -> String {
        Self::render(&DirtyEnvelope {
            schema,
            dirty,
            total: dirty.len(),
        })
    }

    fn format_types(&self, types: &[TypeResolution]) -> String {
        Self::render(&TypesEnvelope {
            types,
            total: types.len(),
        })
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }
}

/// Table output formatter.
///
/// Formats output as human-readable tables.
pub struct TableFormatter;

impl TableFormatter {
    fn table(header: [&str; 2], rows: impl Iterator<Item = [String; 2]>) -> String {
        let mut builder = Builder::default();
        builder.push_record(header);
        for row in rows {
            builder.push_record(row);
        }
        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_record(&self, schema: &str, mode: Mode, values: &[(String, Value)]) -> String {
        let table = Self::table(
            ["Field", "Value"],
            values
                .iter()
                .map(|(name, value)| [name.clone(), value.to_text()]),
        );
        format!("{schema} is valid ({}):\n{table}", mode_label(mode))
    }

    fn format_validation(&self, schema: &str, messages: &[String]) -> String {
        let mut output = format!("{schema} failed validation:");
        for message in messages {
            output.push_str("\n  - ");
            output.push_str(message);
        }
        output
    }

    fn format_dirty(&self, schema: &str, dirty: &IndexMap<String, Value>) -> String {
        if dirty.is_empty() {
            return format!("{schema}: no changes.");
        }
        let table = Self::table(
            ["Field", "New value"],
            dirty.iter().map(|(name, value)| [name.clone(), value.to_text()]),
        );
        format!("{schema}: {} changed field(s):\n{table}", dirty.len())
    }

    fn format_types(&self, types: &[TypeResolution]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Type", "Converter", "Class path"]);
        for resolution in types {
            let resolved = if resolution.is_fallback() {
                format!("{} (fallback)", resolution.resolved)
            } else {
                resolution.resolved.clone()
            };
            builder.push_record([
                resolution.requested.clone(),
                resolved,
                resolution.class_path.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Model => "model",
        Mode::View => "view",
        Mode::ViewEscaped => "escaped",
    }
}

/// Creates an output formatter based on the specified format.
///
/// # Arguments
/// * `json` - Whether to emit JSON instead of tables
///
/// # Returns
/// A boxed OutputFormatter instance
pub fn create_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}
