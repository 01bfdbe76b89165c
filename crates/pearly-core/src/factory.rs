// Rust guideline compliant 2026-10-18

//! Construction of value objects from named schemas.

use crate::escape::EscapeFn;
use crate::schema::{schema_of, Record, Schema};
use crate::vo::Snapshot;
use crate::{Error, Result, TypeRegistry, ValueObject};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Builds value objects wired to one registry and escape function.
///
/// The factory is the view/controller layer's single place for deciding
/// which registry and escaping a value object uses.
#[derive(Clone)]
pub struct VoFactory {
    registry: Arc<TypeRegistry>,
    schemas: HashMap<String, Arc<Schema>>,
    escape: Option<EscapeFn>,
}

impl std::fmt::Debug for VoFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoFactory")
            .field("registry", &self.registry)
            .field("schemas", &self.names())
            .field("escape", &self.escape.is_some())
            .finish()
    }
}

impl VoFactory {
    /// Creates a factory with no schemas and no escape function.
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            schemas: HashMap::new(),
            escape: None,
        }
    }

    /// Builder: install `escape` on every value object built.
    #[must_use]
    pub fn with_escape(mut self, escape: EscapeFn) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Returns the registry handed to built value objects.
    #[must_use]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Registers a schema under its name, replacing any previous one.
    pub fn register(&mut self, schema: Arc<Schema>) {
        self.schemas.insert(schema.name().to_string(), schema);
    }

    /// Registers the schema of a record type.
    ///
    /// # Errors
    ///
    /// Returns a contract error if the record's declaration is invalid.
    pub fn register_record<R: Record>(&mut self) -> Result<()> {
        self.register(schema_of::<R>()?);
        Ok(())
    }

    /// Returns the schema registered under `name`.
    #[must_use]
    pub fn schema(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    /// Returns the registered schema names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.keys().cloned().collect();
        names.sort();
        names
    }

    /// Builds an empty value object for the named schema.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSchema` if no schema is registered under `name`.
    pub fn build(&self, name: &str) -> Result<ValueObject> {
        let schema = self
            .schema(name)
            .ok_or_else(|| Error::UnknownSchema(name.to_string()))?;
        Ok(self.wire(ValueObject::new(schema, Arc::clone(&self.registry))))
    }

    /// Builds an empty value object for a record type.
    ///
    /// # Errors
    ///
    /// Returns a contract error if the record's declaration is invalid.
    pub fn build_record<R: Record>(&self) -> Result<ValueObject> {
        Ok(self.wire(ValueObject::of::<R>(Arc::clone(&self.registry))?))
    }

    /// Restores a snapshot with this factory's escape function.
    ///
    /// Uses the registered schema of the same name when there is one,
    /// otherwise a hook-less schema rebuilt from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a contract error if the snapshot does not match the schema.
    pub fn restore(&self, snapshot: Snapshot) -> Result<ValueObject> {
        let schema = match self.schema(&snapshot.schema) {
            Some(schema) => schema,
            None => {
                debug!(schema = %snapshot.schema, "restoring snapshot without a registered schema");
                Arc::new(Schema::from_snapshot(&snapshot)?)
            }
        };
        ValueObject::restore(
            snapshot,
            schema,
            Arc::clone(&self.registry),
            self.escape.clone(),
        )
    }

    fn wire(&self, mut vo: ValueObject) -> ValueObject {
        if let Some(escape) = &self.escape {
            vo.set_escape(Arc::clone(escape));
        }
        vo
    }
}
