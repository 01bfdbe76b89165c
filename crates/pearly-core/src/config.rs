// Rust guideline compliant 2026-10-18

//! Configuration management for Pearly.

use crate::registry::{Context, DEFAULT_TYPE_PATTERN, FRAMEWORK_NAMESPACE};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "pearly.toml";

/// Configuration for the model layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Package namespace searched first for type converters.
    #[serde(default = "default_package")]
    pub package: String,

    /// Locale used for date display (e.g. `en_US`).
    #[serde(default)]
    pub locale: Option<String>,

    /// Whether dates are displayed as ISO-8601.
    #[serde(default)]
    pub iso8601: bool,

    /// Class-path template used to resolve type converters.
    #[serde(default = "default_type_pattern")]
    pub type_pattern: String,

    /// Extra namespaces searched after the package namespace.
    #[serde(default)]
    pub fallback_namespaces: Vec<String>,
}

/// Default package namespace.
fn default_package() -> String {
    FRAMEWORK_NAMESPACE.to_string()
}

/// Default converter class-path template.
fn default_type_pattern() -> String {
    DEFAULT_TYPE_PATTERN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: default_package(),
            locale: None,
            iso8601: false,
            type_pattern: default_type_pattern(),
            fallback_namespaces: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from a file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `path`, if it exists
    /// 3. Environment variables with `PEARLY_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - An environment override has an invalid value
    /// - Configuration values fail validation
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Loads `pearly.toml` from a directory.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_dir(dir: &Path) -> Result<Self> {
        Self::load(&dir.join(CONFIG_FILE))
    }

    /// Applies `PEARLY_*` overrides read through `lookup`.
    ///
    /// Supported variables:
    /// - `PEARLY_PACKAGE` - Package namespace
    /// - `PEARLY_LOCALE` - Display locale (empty clears it)
    /// - `PEARLY_ISO8601` - ISO-8601 date display (true/false/1/0)
    /// - `PEARLY_TYPE_PATTERN` - Converter class-path template
    /// - `PEARLY_FALLBACK_NAMESPACES` - Comma-separated namespaces
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean override cannot be parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("PEARLY_PACKAGE") {
            self.package = val;
        }

        if let Some(val) = lookup("PEARLY_LOCALE") {
            self.locale = if val.is_empty() { None } else { Some(val) };
        }

        if let Some(val) = lookup("PEARLY_ISO8601") {
            self.iso8601 = match val.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(Error::InvalidConfig(
                        "PEARLY_ISO8601 must be true, false, 1 or 0".to_string(),
                    ))
                }
            };
        }

        if let Some(val) = lookup("PEARLY_TYPE_PATTERN") {
            self.type_pattern = val;
        }

        if let Some(val) = lookup("PEARLY_FALLBACK_NAMESPACES") {
            self.fallback_namespaces = val
                .split(',')
                .map(str::trim)
                .filter(|ns| !ns.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - package is empty
    /// - type_pattern has no `{Name}` placeholder
    pub fn validate(&self) -> Result<()> {
        if self.package.trim().is_empty() {
            return Err(Error::InvalidConfig("package cannot be empty".to_string()));
        }

        if !self.type_pattern.contains("{Name}") {
            return Err(Error::InvalidConfig(format!(
                "type_pattern must contain {{Name}}, got '{}'",
                self.type_pattern
            )));
        }

        Ok(())
    }

    /// Returns the request context described by this configuration.
    #[must_use]
    pub fn context(&self) -> Context {
        Context {
            package: self.package.clone(),
            locale: self.locale.clone(),
            iso8601: self.iso8601,
        }
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.package, "Pearly");
        assert_eq!(config.locale, None);
        assert!(!config.iso8601);
        assert_eq!(config.type_pattern, "{package}.Model.Type.{Name}Type");
        assert!(config.fallback_namespaces.is_empty());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        let content = r#"
package = "Shop"
locale = "en_US"
iso8601 = true
fallback_namespaces = ["Common"]
"#;
        std::fs::write(&path, content).unwrap();

        let mut config: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        config.apply_overrides(env(&[])).unwrap();
        config.validate().unwrap();

        assert_eq!(config.package, "Shop");
        assert_eq!(config.locale.as_deref(), Some("en_US"));
        assert!(config.iso8601);
        assert_eq!(config.fallback_namespaces, vec!["Common".to_string()]);
        assert_eq!(config.type_pattern, DEFAULT_TYPE_PATTERN);
    }

    #[test]
    fn test_config_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.apply_overrides(env(&[])).unwrap();
        assert!(!temp_dir.path().join(CONFIG_FILE).exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "package = [").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_config_validation_pattern_needs_name() {
        let config = Config {
            type_pattern: "{package}.Types".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_package() {
        let config = Config {
            package: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("PEARLY_PACKAGE", "Blog"),
                ("PEARLY_LOCALE", "fr_FR"),
                ("PEARLY_ISO8601", "1"),
                ("PEARLY_TYPE_PATTERN", "{package}::types::{Name}"),
                ("PEARLY_FALLBACK_NAMESPACES", "Common, Shared,"),
            ]))
            .unwrap();

        assert_eq!(config.package, "Blog");
        assert_eq!(config.locale.as_deref(), Some("fr_FR"));
        assert!(config.iso8601);
        assert_eq!(config.type_pattern, "{package}::types::{Name}");
        assert_eq!(
            config.fallback_namespaces,
            vec!["Common".to_string(), "Shared".to_string()]
        );
    }

    #[test]
    fn test_env_empty_locale_clears() {
        let mut config = Config {
            locale: Some("en_US".to_string()),
            ..Config::default()
        };
        config.apply_overrides(env(&[("PEARLY_LOCALE", "")])).unwrap();
        assert_eq!(config.locale, None);
    }

    #[test]
    fn test_env_invalid_iso8601() {
        let mut config = Config::default();
        let result = config.apply_overrides(env(&[("PEARLY_ISO8601", "maybe")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        let original = Config {
            package: "Shop".to_string(),
            locale: Some("de_DE".to_string()),
            iso8601: true,
            type_pattern: DEFAULT_TYPE_PATTERN.to_string(),
            fallback_namespaces: vec!["Common".to_string()],
        };

        original.save(&path).unwrap();
        let loaded: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_context_mirrors_config() {
        let config = Config {
            package: "Shop".to_string(),
            locale: Some("en_GB".to_string()),
            iso8601: true,
            ..Config::default()
        };
        let context = config.context();
        assert_eq!(context.package, "Shop");
        assert_eq!(context.locale.as_deref(), Some("en_GB"));
        assert!(context.iso8601);
    }
}
