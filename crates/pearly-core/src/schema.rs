// Rust guideline compliant 2026-10-18

//! Static value object declarations.
//!
//! A `Schema` lists the managed fields of one kind of value object, their
//! specs, and optional hooks. It is built once and shared; `schema_of`
//! caches the schema of each `Record` type for the life of the process.

use crate::vo::Snapshot;
use crate::{Error, FieldSpec, Result, Value, ValueObject};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Custom getter replacing typed conversion for one field.
pub type GetterHook = Arc<dyn Fn(&ValueObject) -> Result<Value> + Send + Sync>;

/// Custom setter replacing typed conversion for one field.
pub type SetterHook = Arc<dyn Fn(&mut ValueObject, Value) -> Result<()> + Send + Sync>;

/// Object-level validator run before the per-field validators.
pub type ObjectValidator = Arc<dyn Fn(&ValueObject) -> Result<Vec<String>> + Send + Sync>;

/// Declaration of one kind of value object.
pub struct Schema {
    name: String,
    fields: Vec<String>,
    managed: HashSet<String>,
    specs: IndexMap<String, FieldSpec>,
    defaults: FieldSpec,
    resolved: HashMap<String, FieldSpec>,
    getters: HashMap<String, GetterHook>,
    setters: HashMap<String, SetterHook>,
    validator: Option<ObjectValidator>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("specs", &self.specs)
            .field("defaults", &self.defaults)
            .field("getters", &self.getters.keys().collect::<Vec<_>>())
            .field("setters", &self.setters.keys().collect::<Vec<_>>())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

impl Schema {
    /// Starts declaring a schema.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Rebuilds a hook-less schema from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a contract error if the snapshot's specs name unmanaged fields.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Schema> {
        let mut builder = Schema::builder(snapshot.schema.clone())
            .defaults(snapshot.field_defaults.clone());
        for field in &snapshot.fields {
            builder = match snapshot.field_specs.get(field) {
                Some(spec) => builder.field_with(field.clone(), spec.clone()),
                None => builder.field(field.clone()),
            };
        }
        if let Some(stray) = snapshot
            .field_specs
            .keys()
            .find(|name| !snapshot.fields.contains(*name))
        {
            return Err(Error::Contract(format!(
                "snapshot declares a spec for unmanaged field '{stray}'"
            )));
        }
        builder.build()
    }

    /// Returns the schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the managed fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns true if `name` is a managed field.
    #[must_use]
    pub fn is_managed(&self, name: &str) -> bool {
        self.managed.contains(name)
    }

    /// Returns the explicitly declared specs in declaration order.
    ///
    /// Only these fields are validated.
    #[must_use]
    pub fn specs(&self) -> &IndexMap<String, FieldSpec> {
        &self.specs
    }

    /// Returns the object-wide spec defaults.
    #[must_use]
    pub fn defaults(&self) -> &FieldSpec {
        &self.defaults
    }

    /// Returns the spec of a managed field merged with the defaults.
    #[must_use]
    pub fn resolved_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.resolved.get(name)
    }

    /// Returns the type name used for a managed field.
    #[must_use]
    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.resolved.get(name).map(FieldSpec::type_or_default)
    }

    pub(crate) fn getter(&self, name: &str) -> Option<&GetterHook> {
        self.getters.get(name)
    }

    pub(crate) fn setter(&self, name: &str) -> Option<&SetterHook> {
        self.setters.get(name)
    }

    pub(crate) fn validator(&self) -> Option<&ObjectValidator> {
        self.validator.as_ref()
    }
}

/// Builder for [`Schema`].
pub struct SchemaBuilder {
    name: String,
    fields: Vec<String>,
    specs: IndexMap<String, FieldSpec>,
    defaults: FieldSpec,
    getters: HashMap<String, GetterHook>,
    setters: HashMap<String, SetterHook>,
    validator: Option<ObjectValidator>,
}

impl SchemaBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            specs: IndexMap::new(),
            defaults: FieldSpec::defaults(),
            getters: HashMap::new(),
            setters: HashMap::new(),
            validator: None,
        }
    }

    /// Declares a managed field without a spec; it uses the defaults and is
    /// not validated.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Declares a managed field with a spec; it is validated.
    #[must_use]
    pub fn field_with(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        let name = name.into();
        self.fields.push(name.clone());
        self.specs.insert(name, spec);
        self
    }

    /// Replaces the object-wide spec defaults.
    #[must_use]
    pub fn defaults(mut self, defaults: FieldSpec) -> Self {
        self.defaults = defaults;
        self
    }

    /// Installs a custom getter for a field.
    #[must_use]
    pub fn getter<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&ValueObject) -> Result<Value> + Send + Sync + 'static,
    {
        self.getters.insert(name.into(), Arc::new(hook));
        self
    }

    /// Installs a custom setter for a field.
    #[must_use]
    pub fn setter<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut ValueObject, Value) -> Result<()> + Send + Sync + 'static,
    {
        self.setters.insert(name.into(), Arc::new(hook));
        self
    }

    /// Installs the object-level validator.
    #[must_use]
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&ValueObject) -> Result<Vec<String>> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Finishes the declaration.
    ///
    /// # Errors
    ///
    /// Returns a contract error if:
    /// - A field name is empty or declared twice
    /// - A hook targets a field that is not declared
    pub fn build(self) -> Result<Schema> {
        let mut managed = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.is_empty() {
                return Err(Error::Contract(format!(
                    "schema '{}' declares an empty field name",
                    self.name
                )));
            }
            if !managed.insert(field.clone()) {
                return Err(Error::Contract(format!(
                    "schema '{}' declares field '{}' twice",
                    self.name, field
                )));
            }
        }

        for (kind, name) in self
            .getters
            .keys()
            .map(|n| ("getter", n))
            .chain(self.setters.keys().map(|n| ("setter", n)))
        {
            if !managed.contains(name) {
                return Err(Error::Contract(format!(
                    "schema '{}' has a {} for undeclared field '{}'",
                    self.name, kind, name
                )));
            }
        }

        let resolved = self
            .fields
            .iter()
            .map(|field| {
                let spec = self
                    .specs
                    .get(field)
                    .map_or_else(|| self.defaults.clone(), |s| s.merged(&self.defaults));
                (field.clone(), spec)
            })
            .collect();

        Ok(Schema {
            name: self.name,
            fields: self.fields,
            managed,
            specs: self.specs,
            defaults: self.defaults,
            resolved,
            getters: self.getters,
            setters: self.setters,
            validator: self.validator,
        })
    }
}

/// A Rust type that declares a kind of value object.
pub trait Record: 'static {
    /// Declares the schema. Called once per type.
    fn declare() -> SchemaBuilder;
}

fn schema_cache() -> &'static RwLock<HashMap<TypeId, Arc<Schema>>> {
    static CACHE: OnceLock<RwLock<HashMap<TypeId, Arc<Schema>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Returns the cached schema for `R`, declaring it on first use.
///
/// # Errors
///
/// Returns the declaration's contract error; failed declarations are not
/// cached.
pub fn schema_of<R: Record>() -> Result<Arc<Schema>> {
    let key = TypeId::of::<R>();
    if let Some(schema) = schema_cache().read().get(&key) {
        return Ok(Arc::clone(schema));
    }

    let schema = Arc::new(R::declare().build()?);
    let mut cache = schema_cache().write();
    Ok(Arc::clone(cache.entry(key).or_insert(schema)))
}
