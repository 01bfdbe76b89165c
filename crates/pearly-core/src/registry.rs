// Rust guideline compliant 2026-10-18

//! Type registry and request context.
//!
//! The registry maps type names to converter instances. Converters that are
//! not registered yet are resolved lazily through a class-path convention:
//!
//! 1. `<package>.Model.Type.<Name>Type` for the active package
//! 2. the same path for every namespace added with `register_fallback`
//! 3. `Pearly.Model.Type.<Name>Type` for the framework converters
//!
//! Anything still unresolved is served by the `string` converter, so lookup
//! never fails. Class paths compare case-insensitively.

use crate::types::{builtin_providers, ConverterProvider, StringType, TypeConverter};
use crate::Config;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Namespace holding the framework converters.
pub const FRAMEWORK_NAMESPACE: &str = "Pearly";

/// Default class-path template for converter resolution.
pub const DEFAULT_TYPE_PATTERN: &str = "{package}.Model.Type.{Name}Type";

/// Name of the converter used for unknown types.
pub const FALLBACK_TYPE: &str = "string";

/// Per-request settings that converters are constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Package namespace searched first for converters.
    pub package: String,
    /// Locale used for date display, e.g. `en_US`.
    #[serde(default)]
    pub locale: Option<String>,
    /// Whether dates display as ISO-8601 regardless of locale.
    #[serde(default)]
    pub iso8601: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            package: FRAMEWORK_NAMESPACE.to_string(),
            locale: None,
            iso8601: false,
        }
    }
}

impl Context {
    /// Creates a context for the given package with default display settings.
    #[must_use]
    pub fn for_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }
}

struct Inner {
    context: Context,
    pattern: String,
    converters: HashMap<String, Arc<dyn TypeConverter>>,
    classes: HashMap<String, ConverterProvider>,
    fallbacks: Vec<String>,
    misses: HashSet<String>,
    /// Requested name -> registered name, for classes that register under
    /// a name other than the one they were looked up by.
    aliases: HashMap<String, String>,
    /// Registered name -> class path it was resolved from.
    origins: HashMap<String, String>,
}

impl Inner {
    fn namespaces(&self) -> Vec<String> {
        let mut namespaces = vec![self.context.package.clone()];
        for namespace in self
            .fallbacks
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(FRAMEWORK_NAMESPACE))
        {
            if !namespaces.iter().any(|n| n == namespace) {
                namespaces.push(namespace.to_string());
            }
        }
        namespaces
    }

    fn class_path(&self, namespace: &str, type_name: &str) -> String {
        self.pattern
            .replace("{package}", namespace)
            .replace("{Name}", &capitalize(type_name))
    }

    fn lookup(&self, name: &str) -> Option<Arc<dyn TypeConverter>> {
        self.converters
            .get(name)
            .or_else(|| {
                self.aliases
                    .get(name)
                    .and_then(|registered| self.converters.get(registered))
            })
            .cloned()
    }

    fn fallback(&self) -> Arc<dyn TypeConverter> {
        self.converters
            .get(FALLBACK_TYPE)
            .cloned()
            .unwrap_or_else(|| Arc::new(StringType))
    }

    fn register(&mut self, converter: Arc<dyn TypeConverter>) {
        self.origins.remove(converter.name());
        self.converters.insert(converter.name().to_string(), converter);
    }
}

/// Registry of type converters for one request context.
///
/// Reads take a shared lock; registration takes an exclusive one. Class
/// providers run with no lock held, so a provider may itself look up
/// converters. Share it as `Arc<TypeRegistry>`.
pub struct TypeRegistry {
    inner: RwLock<Inner>,
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("TypeRegistry")
            .field("context", &inner.context)
            .field("pattern", &inner.pattern)
            .field("converters", &inner.converters.keys().collect::<Vec<_>>())
            .field("fallbacks", &inner.fallbacks)
            .finish()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(Context::default())
    }
}

impl TypeRegistry {
    /// Creates a registry with the default class-path template.
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self::with_pattern(context, DEFAULT_TYPE_PATTERN)
    }

    /// Creates a registry with a custom class-path template.
    ///
    /// The template may use `{package}` and `{Name}` placeholders.
    #[must_use]
    pub fn with_pattern(context: Context, pattern: impl Into<String>) -> Self {
        let mut inner = Inner {
            context,
            pattern: pattern.into(),
            converters: HashMap::new(),
            classes: HashMap::new(),
            fallbacks: Vec::new(),
            misses: HashSet::new(),
            aliases: HashMap::new(),
            origins: HashMap::new(),
        };
        inner.register(Arc::new(StringType));

        let registry = Self {
            inner: RwLock::new(inner),
        };
        for (class, provider) in builtin_providers() {
            let path = format!("{FRAMEWORK_NAMESPACE}.Model.Type.{class}");
            registry.register_class(&path, provider);
        }
        registry
    }

    /// Creates a registry from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let registry = Self::with_pattern(config.context(), config.type_pattern.clone());
        for namespace in &config.fallback_namespaces {
            registry.register_fallback(namespace);
        }
        registry
    }

    /// Registers a converter under its own name, replacing any previous one.
    pub fn register(&self, converter: Arc<dyn TypeConverter>) {
        let mut inner = self.inner.write();
        inner.misses.remove(converter.name());
        inner.register(converter);
    }

    /// Makes a converter class available for lazy resolution.
    ///
    /// `path` is the full class path, e.g. `Shop.Model.Type.MoneyType`.
    pub fn register_class(&self, path: &str, provider: ConverterProvider) {
        let mut inner = self.inner.write();
        inner.classes.insert(path.to_lowercase(), provider);
        inner.misses.clear();
    }

    /// Adds a namespace searched after the active package and before the
    /// framework namespace.
    pub fn register_fallback(&self, namespace: &str) {
        let mut inner = self.inner.write();
        if !inner.fallbacks.iter().any(|n| n == namespace) {
            inner.fallbacks.push(namespace.to_string());
            inner.misses.clear();
        }
    }

    /// Returns the converter for `name`, resolving it on first use.
    ///
    /// Unknown names return the `string` converter. A resolved class never
    /// replaces a converter already registered under the same name.
    pub fn get(&self, name: &str) -> Arc<dyn TypeConverter> {
        let (path, provider, context) = {
            let inner = self.inner.read();
            if let Some(converter) = inner.lookup(name) {
                return converter;
            }
            if inner.misses.contains(name) {
                return inner.fallback();
            }
            let found = inner.namespaces().into_iter().find_map(|namespace| {
                let path = inner.class_path(&namespace, name);
                let provider = inner.classes.get(&path.to_lowercase()).cloned()?;
                Some((path, provider))
            });
            match found {
                Some((path, provider)) => (path, provider, inner.context.clone()),
                None => {
                    drop(inner);
                    debug!(type_name = name, "unknown type, using string converter");
                    let mut inner = self.inner.write();
                    if let Some(converter) = inner.lookup(name) {
                        return converter;
                    }
                    inner.misses.insert(name.to_string());
                    return inner.fallback();
                }
            }
        };

        let converter = provider(&context);
        let registered = converter.name().to_string();
        debug!(type_name = name, class = %path, registered_as = %registered, "resolved type converter");
        if registered != name {
            warn!(
                type_name = name,
                class = %path,
                registered_as = %registered,
                "converter class registers under a different name"
            );
        }

        let mut inner = self.inner.write();
        if let Some(existing) = inner.lookup(name) {
            return existing;
        }
        if !inner.converters.contains_key(&registered) {
            inner.origins.insert(registered.clone(), path);
        }
        let converter = Arc::clone(
            inner
                .converters
                .entry(registered.clone())
                .or_insert(converter),
        );
        if registered != name {
            inner.aliases.insert(name.to_string(), registered);
        }
        converter
    }

    /// Returns the class path the converter for `name` was resolved from.
    ///
    /// `None` when the converter was registered directly or `name` is
    /// unknown.
    #[must_use]
    pub fn resolved_class(&self, name: &str) -> Option<String> {
        let inner = self.inner.read();
        if inner.converters.contains_key(name) {
            return inner.origins.get(name).cloned();
        }
        let registered = inner.aliases.get(name)?;
        inner.origins.get(registered).cloned()
    }

    /// Returns true if a converter is registered or resolvable for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).name() == name
    }

    /// Drops every resolved converter and installs a new context.
    ///
    /// Class providers and fallback namespaces are kept. Used between
    /// requests so converters never carry a previous request's package or
    /// locale.
    pub fn reset(&self, context: Context) {
        let mut inner = self.inner.write();
        info!(package = %context.package, "resetting type registry");
        inner.converters.clear();
        inner.misses.clear();
        inner.aliases.clear();
        inner.origins.clear();
        inner.context = context;
        inner.register(Arc::new(StringType));
    }

    /// Returns a copy of the active context.
    #[must_use]
    pub fn context(&self) -> Context {
        self.inner.read().context.clone()
    }

    /// Returns the class path the registry would try for `type_name` in
    /// `namespace`.
    #[must_use]
    pub fn class_path(&self, namespace: &str, type_name: &str) -> String {
        self.inner.read().class_path(namespace, type_name)
    }

    /// Returns the names of the currently registered converters, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().converters.keys().cloned().collect();
        names.sort();
        names
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("date"), "Date");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_class_path_uses_pattern() {
        let registry = TypeRegistry::new(Context::for_package("Shop"));
        assert_eq!(registry.class_path("Shop", "money"), "Shop.Model.Type.MoneyType");
    }

    #[test]
    fn test_namespace_order_skips_duplicates() {
        let registry = TypeRegistry::new(Context::default());
        registry.register_fallback("Pearly");
        registry.register_fallback("Common");
        let inner = registry.inner.read();
        assert_eq!(inner.namespaces(), vec!["Pearly".to_string(), "Common".to_string()]);
    }

    #[test]
    fn test_string_is_registered_eagerly() {
        let registry = TypeRegistry::default();
        assert_eq!(registry.names(), vec!["string".to_string()]);
    }
}
