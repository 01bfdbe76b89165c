// Rust guideline compliant 2026-10-18

//! Implementation of the `pearly check` command.
//!
//! Builds a value object from a schema file, assigns every key of a record
//! file, validates it and prints the fields through the requested mode.

use crate::input::{load_record, load_schema};
use crate::OutputFormatter;
use anyhow::{Context, Result};
use pearly_core::{escape, EscapeFn, Error, Mode, TypeRegistry, Value, VoFactory};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The record validated.
    Valid,
    /// The record failed validation; messages were printed.
    Invalid,
}

/// Validates a record against a schema file.
///
/// # Arguments
///
/// * `schema_path` - Schema TOML file
/// * `record_path` - Record JSON file
/// * `mode` - Mode used to print the fields (`model`, `view`, `escaped`)
/// * `escape_kind` - Escape function installed for escaped reads (`none`, `html`, `xml`)
/// * `registry` - Type registry for the request
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if:
/// - A file cannot be read or parsed
/// - The record names a field the schema does not declare
/// - The mode or escape name is unknown
pub fn execute(
    schema_path: &Path,
    record_path: &Path,
    mode: &str,
    escape_kind: &str,
    registry: Arc<TypeRegistry>,
    formatter: &dyn OutputFormatter,
) -> Result<CheckOutcome> {
    let mode: Mode = mode.parse()?;
    let schema = load_schema(schema_path)?;
    let record = load_record(record_path)?;
    let name = schema.name().to_string();

    let mut factory = VoFactory::new(registry);
    if let Some(escape) = escape_fn(escape_kind)? {
        factory = factory.with_escape(escape);
    }
    factory.register(Arc::new(schema));

    let mut vo = factory.build(&name)?;
    for (field, value) in record {
        vo.set(&field, value)
            .with_context(|| format!("Cannot assign '{}' on {}", field, name))?;
    }

    match vo.validate() {
        Ok(()) => {}
        Err(Error::Validation(failure)) => {
            info!(schema = %name, count = failure.messages().len(), "record failed validation");
            println!("{}", formatter.format_validation(&name, failure.messages()));
            return Ok(CheckOutcome::Invalid);
        }
        Err(err) => return Err(err.into()),
    }

    vo.set_mode(mode);
    let values = vo
        .iter()
        .map(|entry| entry.map(|(field, value)| (field.to_string(), value)))
        .collect::<pearly_core::Result<Vec<(String, Value)>>>()?;
    println!("{}", formatter.format_record(&name, mode, &values));

    Ok(CheckOutcome::Valid)
}

/// Returns the escape function for an escape name.
///
/// # Errors
///
/// Returns an error for names other than `none`, `html` and `xml`.
pub fn escape_fn(kind: &str) -> Result<Option<EscapeFn>> {
    match kind {
        "none" => Ok(None),
        "html" => Ok(Some(escape::html())),
        "xml" => Ok(Some(escape::xml())),
        other => anyhow::bail!("Unknown escape '{}', expected none, html or xml", other),
    }
}
