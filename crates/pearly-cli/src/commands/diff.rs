// Rust guideline compliant 2026-10-18

//! Implementation of the `pearly diff` command.
//!
//! Loads a record as the clean baseline, applies a second record on top and
//! prints the fields whose internal value changed.

use crate::input::{load_record, load_schema};
use crate::OutputFormatter;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use pearly_core::{Mode, TypeRegistry, Value, ValueObject};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Prints the fields that differ between two records.
///
/// Changed values are shown in storage form.
///
/// # Errors
///
/// Returns an error if:
/// - A file cannot be read or parsed
/// - A record names a field the schema does not declare
pub fn execute(
    schema_path: &Path,
    before_path: &Path,
    after_path: &Path,
    registry: Arc<TypeRegistry>,
    formatter: &dyn OutputFormatter,
) -> Result<IndexMap<String, Value>> {
    let schema = Arc::new(load_schema(schema_path)?);
    let before = load_record(before_path)?;
    let after = load_record(after_path)?;
    let name = schema.name().to_string();

    let mut vo = ValueObject::new(schema, registry);
    vo.set_mode(Mode::Model);
    apply(&mut vo, before, "before")?;
    vo.clean_values();
    apply(&mut vo, after, "after")?;

    let dirty = vo.get_dirty()?;
    debug!(schema = %name, changed = dirty.len(), "computed record diff");
    println!("{}", formatter.format_dirty(&name, &dirty));
    Ok(dirty)
}

fn apply(vo: &mut ValueObject, record: IndexMap<String, Value>, label: &str) -> Result<()> {
    for (field, value) in record {
        vo.set(&field, value)
            .with_context(|| format!("Cannot assign '{}' from the {} record", field, label))?;
    }
    Ok(())
}
