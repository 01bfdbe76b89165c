// Rust guideline compliant 2026-10-18

//! Schema and record files read by the CLI.
//!
//! A schema file is TOML:
//!
//! ```toml
//! name = "Article"
//!
//! [defaults]
//! maxlength = 200
//!
//! [[field]]
//! name = "title"
//! type = "string"
//! maxlength = 10
//!
//! [[field]]
//! name = "notes"
//! ```
//!
//! A `[[field]]` table holding only `name` declares an unvalidated field.
//! A record file is a JSON object mapping field names to values.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use pearly_core::{FieldSpec, Schema, Value};
use serde::Deserialize;
use std::path::Path;

/// Parsed schema file.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaFile {
    /// Schema name.
    pub name: String,
    /// Object-wide spec defaults, merged over `{type = "string"}`.
    #[serde(default)]
    pub defaults: Option<FieldSpec>,
    /// Field declarations in order.
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldEntry>,
}

/// One `[[field]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldEntry {
    /// Field name.
    pub name: String,
    /// Remaining keys form the field spec.
    #[serde(flatten)]
    pub spec: FieldSpec,
}

impl SchemaFile {
    /// Parses schema TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid schema file.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the declared schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is empty or declared twice.
    pub fn to_schema(&self) -> Result<Schema> {
        let defaults = match &self.defaults {
            Some(spec) => spec.merged(&FieldSpec::defaults()),
            None => FieldSpec::defaults(),
        };
        let mut builder = Schema::builder(self.name.clone()).defaults(defaults);
        for entry in &self.fields {
            builder = if entry.spec == FieldSpec::default() {
                builder.field(entry.name.clone())
            } else {
                builder.field_with(entry.name.clone(), entry.spec.clone())
            };
        }
        Ok(builder.build()?)
    }
}

/// Reads and builds a schema file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or declares an invalid schema.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;
    SchemaFile::parse(&text)
        .and_then(|file| file.to_schema())
        .with_context(|| format!("Invalid schema file {}", path.display()))
}

/// Parses a record from JSON object text.
///
/// # Errors
///
/// Returns an error if the text is not a JSON object.
pub fn parse_record(text: &str) -> Result<IndexMap<String, Value>> {
    let map: IndexMap<String, serde_json::Value> =
        serde_json::from_str(text).context("record must be a JSON object")?;
    Ok(map
        .into_iter()
        .map(|(key, value)| (key, Value::from_json(value)))
        .collect())
}

/// Reads a record file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object.
pub fn load_record(path: &Path) -> Result<IndexMap<String, Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file {}", path.display()))?;
    parse_record(&text).with_context(|| format!("Invalid record file {}", path.display()))
}
