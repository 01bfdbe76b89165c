// Rust guideline compliant 2026-10-18

//! Value objects: typed field containers with mode-dependent reads.
//!
//! Every read goes through the field's type converter:
//!
//! | Mode          | Read transformation                          |
//! |---------------|----------------------------------------------|
//! | `Model`       | `to_storage`                                 |
//! | `View`        | `to_display`                                 |
//! | `ViewEscaped` | `to_display`, then the escape fn if one is set |
//!
//! Writes always go through `to_internal`, so stored values are internal
//! representation only. Display and storage forms are computed per read and
//! never cached.

use crate::escape::EscapeFn;
use crate::schema::{schema_of, Record, Schema};
use crate::{Error, FieldSpec, Result, TypeRegistry, ValidationFailure, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Read lens applied by [`ValueObject::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Storage-shaped values for the persistence layer.
    Model,
    /// Human-readable values.
    View,
    /// Human-readable values passed through the escape function.
    #[default]
    ViewEscaped,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "model" => Ok(Mode::Model),
            "view" => Ok(Mode::View),
            "escaped" | "view_escaped" => Ok(Mode::ViewEscaped),
            other => Err(Error::InvalidInput(format!(
                "unknown mode '{other}', expected model, view or escaped"
            ))),
        }
    }
}

/// Serializable state of a value object.
///
/// Hooks and the escape function are not part of a snapshot. JSON has no
/// NaN or infinity, so a non-finite `Value::Float` encodes as `null` and
/// restores as `Value::Null`; every other value round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema name.
    pub schema: String,
    /// Explicitly declared field specs.
    pub field_specs: IndexMap<String, FieldSpec>,
    /// Object-wide spec defaults.
    pub field_defaults: FieldSpec,
    /// Managed field names in declaration order.
    pub fields: Vec<String>,
    /// Stored internal values.
    pub values: IndexMap<String, Value>,
    /// Active mode.
    pub mode: Mode,
}

/// A typed, validated field container.
#[derive(Clone)]
pub struct ValueObject {
    schema: Arc<Schema>,
    registry: Arc<TypeRegistry>,
    values: IndexMap<String, Value>,
    orig_values: IndexMap<String, Value>,
    mode: Mode,
    escape: Option<EscapeFn>,
}

impl fmt::Debug for ValueObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueObject")
            .field("schema", &self.schema.name())
            .field("values", &self.values)
            .field("orig_values", &self.orig_values)
            .field("mode", &self.mode)
            .field("escape", &self.escape.is_some())
            .finish()
    }
}

impl ValueObject {
    /// Creates an empty value object for a schema.
    #[must_use]
    pub fn new(schema: Arc<Schema>, registry: Arc<TypeRegistry>) -> Self {
        Self {
            schema,
            registry,
            values: IndexMap::new(),
            orig_values: IndexMap::new(),
            mode: Mode::default(),
            escape: None,
        }
    }

    /// Creates an empty value object for a record type.
    ///
    /// # Errors
    ///
    /// Returns a contract error if the record's declaration is invalid.
    pub fn of<R: Record>(registry: Arc<TypeRegistry>) -> Result<Self> {
        Ok(Self::new(schema_of::<R>()?, registry))
    }

    /// Restores a value object from a snapshot.
    ///
    /// The escape function is not serializable, so the caller passes the one
    /// to install.
    ///
    /// # Errors
    ///
    /// Returns a contract error if the snapshot does not match `schema`.
    pub fn restore(
        snapshot: Snapshot,
        schema: Arc<Schema>,
        registry: Arc<TypeRegistry>,
        escape: Option<EscapeFn>,
    ) -> Result<Self> {
        if snapshot.fields != schema.fields() {
            return Err(Error::Contract(format!(
                "snapshot fields {:?} do not match schema '{}' fields {:?}",
                snapshot.fields,
                schema.name(),
                schema.fields()
            )));
        }
        if &snapshot.field_specs != schema.specs() || &snapshot.field_defaults != schema.defaults()
        {
            return Err(Error::Contract(format!(
                "snapshot specs do not match schema '{}'",
                schema.name()
            )));
        }
        if let Some(stray) = snapshot.values.keys().find(|k| !schema.is_managed(k)) {
            return Err(Error::Contract(format!(
                "snapshot holds a value for unmanaged field '{stray}'"
            )));
        }

        Ok(Self {
            schema,
            registry,
            values: snapshot.values,
            orig_values: IndexMap::new(),
            mode: snapshot.mode,
            escape,
        })
    }

    /// Captures the serializable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            schema: self.schema.name().to_string(),
            field_specs: self.schema.specs().clone(),
            field_defaults: self.schema.defaults().clone(),
            fields: self.schema.fields().to_vec(),
            values: self.values.clone(),
            mode: self.mode,
        }
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the type registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Returns the active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sets the active mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Installs the escape function used in `ViewEscaped` mode.
    pub fn set_escape(&mut self, escape: EscapeFn) {
        self.escape = Some(escape);
    }

    /// Removes the escape function; escaped reads then return display values.
    pub fn clear_escape(&mut self) {
        self.escape = None;
    }

    /// Returns true if an escape function is installed.
    #[must_use]
    pub fn has_escape(&self) -> bool {
        self.escape.is_some()
    }

    /// Returns true if `name` is a managed field.
    #[must_use]
    pub fn is_managed(&self, name: &str) -> bool {
        self.schema.is_managed(name)
    }

    /// Returns true if `name` is managed and holds a non-null value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.is_managed(name) && self.values.get(name).is_some_and(|v| !v.is_null())
    }

    fn ensure_managed(&self, name: &str) -> Result<()> {
        if self.schema.is_managed(name) {
            Ok(())
        } else {
            Err(Error::UndefinedField(name.to_string()))
        }
    }

    /// Writes a field.
    ///
    /// Delegates to the field's custom setter if one is declared, otherwise
    /// converts with `to_internal` and stores.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedField` if `name` is not managed, or the setter's error.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.ensure_managed(name)?;
        if let Some(hook) = self.schema.setter(name).cloned() {
            return hook(self, value.into());
        }
        self.convert_in(name, value.into())
    }

    /// Reads a field through the active mode.
    ///
    /// Delegates to the field's custom getter if one is declared.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedField` if `name` is not managed, or the getter's error.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.ensure_managed(name)?;
        if let Some(hook) = self.schema.getter(name) {
            return hook(self);
        }
        self.convert_out(name)
    }

    /// Converts input with the field's type and stores it, bypassing hooks.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedField` if `name` is not managed.
    pub fn convert_in(&mut self, name: &str, value: Value) -> Result<()> {
        let converter = self.converter(name)?;
        self.values.insert(name.to_string(), converter.to_internal(value));
        Ok(())
    }

    /// Reads the stored value through the active mode, bypassing hooks.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedField` if `name` is not managed.
    pub fn convert_out(&self, name: &str) -> Result<Value> {
        let converter = self.converter(name)?;
        let value = self.values.get(name).cloned().unwrap_or_default();

        Ok(match self.mode {
            Mode::Model => converter.to_storage(&value),
            Mode::View => converter.to_display(&value),
            Mode::ViewEscaped => {
                let display = converter.to_display(&value);
                match &self.escape {
                    Some(escape) => escape(&display),
                    None => display,
                }
            }
        })
    }

    /// Returns the stored internal value, `Null` if unset.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedField` if `name` is not managed.
    pub fn raw_value(&self, name: &str) -> Result<Value> {
        self.ensure_managed(name)?;
        Ok(self.values.get(name).cloned().unwrap_or_default())
    }

    /// Stores an internal value without conversion.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedField` if `name` is not managed.
    pub fn set_raw_value(&mut self, name: &str, value: Value) -> Result<()> {
        self.ensure_managed(name)?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn converter(&self, name: &str) -> Result<Arc<dyn crate::TypeConverter>> {
        let type_name = self
            .schema
            .type_of(name)
            .ok_or_else(|| Error::UndefinedField(name.to_string()))?;
        Ok(self.registry.get(type_name))
    }

    /// Validates the object.
    ///
    /// Runs in `Model` mode: the object-level validator first, then every
    /// field with an explicit spec. All messages are reported in a single
    /// failure. The previous mode is restored on every path.
    ///
    /// # Errors
    ///
    /// Returns `Validation` with every message, or the first contract error
    /// raised by a validator or getter.
    pub fn validate(&mut self) -> Result<()> {
        let previous = self.mode;
        self.mode = Mode::Model;
        let outcome = self.collect_messages();
        self.mode = previous;

        let messages = outcome?;
        if messages.is_empty() {
            debug!(schema = self.schema.name(), "validation passed");
            return Ok(());
        }
        debug!(
            schema = self.schema.name(),
            count = messages.len(),
            "validation failed"
        );
        Err(Error::Validation(ValidationFailure::from_messages(messages)))
    }

    fn collect_messages(&self) -> Result<Vec<String>> {
        let mut messages = match self.schema.validator() {
            Some(validator) => validator(self)?,
            None => Vec::new(),
        };

        for (name, spec) in self.schema.specs() {
            let spec = spec.merged(self.schema.defaults());
            let converter = self.registry.get(spec.type_or_default());
            let value = self.get(name)?;
            messages.extend(converter.validate(&value, spec.display_name(name), &spec));
        }

        Ok(messages)
    }

    /// Checkpoints every stored value as the dirty baseline.
    pub fn clean_values(&mut self) {
        self.orig_values = self.values.clone();
    }

    /// Moves the baseline of the listed fields to their current value.
    ///
    /// Fields that were never set are ignored.
    pub fn clean(&mut self, keys: &[&str]) {
        for key in keys {
            if let Some(value) = self.values.get(*key) {
                self.orig_values.insert((*key).to_string(), value.clone());
            }
        }
    }

    /// Removes the listed fields from the baseline so they report as dirty.
    pub fn dirty(&mut self, keys: &[&str]) {
        for key in keys {
            self.orig_values.shift_remove(*key);
        }
    }

    /// Returns true if the field's stored value differs from the baseline.
    #[must_use]
    pub fn is_dirty(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(value) => self.orig_values.get(name) != Some(value),
            None => false,
        }
    }

    /// Returns every dirty field with its value read through the active mode.
    ///
    /// Dirtiness compares internal values; the reported values are what
    /// `get` returns.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom getter fails.
    pub fn get_dirty(&self) -> Result<IndexMap<String, Value>> {
        let mut dirty = IndexMap::new();
        for name in self.schema.fields() {
            if self.is_dirty(name) {
                dirty.insert(name.clone(), self.get(name)?);
            }
        }
        Ok(dirty)
    }

    /// Iterates `(field, value)` pairs in declaration order through `get`.
    #[must_use]
    pub fn iter(&self) -> Fields<'_> {
        Fields {
            vo: self,
            names: self.schema.fields().iter(),
        }
    }

    /// Exports every managed field through the active mode.
    ///
    /// Keys are lowercased and `Null` is exported as an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom getter fails.
    pub fn to_json(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut data = serde_json::Map::new();
        for entry in self.iter() {
            let (name, value) = entry?;
            let json = if value.is_null() {
                serde_json::Value::String(String::new())
            } else {
                value.to_json()
            };
            data.insert(name.to_lowercase(), json);
        }
        Ok(data)
    }
}

/// Iterator over a value object's fields.
pub struct Fields<'a> {
    vo: &'a ValueObject,
    names: std::slice::Iter<'a, String>,
}

impl<'a> Iterator for Fields<'a> {
    type Item = Result<(&'a str, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.names.next()?;
        Some(self.vo.get(name).map(|value| (name.as_str(), value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.names.size_hint()
    }
}

impl ExactSizeIterator for Fields<'_> {}

impl<'a> IntoIterator for &'a ValueObject {
    type Item = Result<(&'a str, Value)>;
    type IntoIter = Fields<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
