//! Configuration management for the shortcode engine.
//!
//! Parses `shortcodes.toml` files with serde and provides auto-discovery of
//! config files in parent directories.
//!
//! ```toml
//! [processor]
//! validate = true
//! unknown = "placeholder"   # or "keep", "remove"
//! max_depth = 10
//!
//! [registry]
//! builtins = true
//!
//! [shortcodes.product]
//! description = "Product card"
//! category = "commerce"
//! icon = "shopping-bag"
//!
//! [shortcodes.product.schema]
//! required = ["id"]
//!
//! [shortcodes.product.schema.attributes.id]
//! type = "number"
//! ```
//!
//! Command-line overrides are passed to [`Config::load`] as [`CliSettings`].

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use shortcode_engine::{
    ProcessorConfig, Schema, ShortcodeDescriptor, ShortcodeRegistry, UnknownPolicy,
    is_valid_name, register_builtins,
};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "shortcodes.toml";

/// Upper bound for `processor.max_depth`.
const MAX_DEPTH_LIMIT: usize = 100;

/// Command-line overrides. `None` keeps the value from the file.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override whether built-in shortcodes are registered.
    pub builtins: Option<bool>,
    /// Override schema validation during processing.
    pub validate: Option<bool>,
}

/// Contents of `shortcodes.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Processor behavior.
    pub processor: ProcessorSection,
    /// Registry construction.
    pub registry: RegistrySection,
    /// Shortcodes declared by the project, in file order.
    pub shortcodes: IndexMap<String, ShortcodeEntry>,

    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[processor]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProcessorSection {
    /// Validate shortcodes against their schemas before rendering.
    pub validate: bool,
    /// Handling of unregistered shortcode names.
    pub unknown: UnknownPolicy,
    /// Maximum re-processing depth for renderer output.
    pub max_depth: usize,
}

impl Default for ProcessorSection {
    fn default() -> Self {
        Self {
            validate: true,
            unknown: UnknownPolicy::Placeholder,
            max_depth: 10,
        }
    }
}

/// `[registry]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RegistrySection {
    /// Register the built-in catalog before the file's own shortcodes.
    pub builtins: bool,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self { builtins: true }
    }
}

/// A `[shortcodes.<name>]` entry.
#[derive(Debug, Deserialize)]
pub struct ShortcodeEntry {
    #[serde(default)]
    pub description: String,
    pub icon: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub has_content: bool,
    pub schema: Option<Schema>,
}

fn default_category() -> String {
    "custom".to_owned()
}

impl ShortcodeEntry {
    fn descriptor(&self) -> ShortcodeDescriptor {
        let mut descriptor = ShortcodeDescriptor::new(&self.description, &self.category);
        descriptor.icon.clone_from(&self.icon);
        descriptor.schema.clone_from(&self.schema);
        descriptor.has_content = self.has_content;
        descriptor
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration, then apply command-line overrides.
    ///
    /// An explicit `config_path` must exist. Otherwise `shortcodes.toml` is
    /// searched for in the current directory and its parents, and defaults are
    /// used when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(builtins) = settings.builtins {
            self.registry.builtins = builtins;
        }
        if let Some(validate) = settings.validate {
            self.processor.validate = validate;
        }
    }

    /// Parse and validate one file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Check value ranges, shortcode names and schema defaults.
    ///
    /// Runs as part of loading from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_processor()?;
        for (name, entry) in &self.shortcodes {
            validate_entry(name, entry)?;
        }
        Ok(())
    }

    fn validate_processor(&self) -> Result<(), ConfigError> {
        let depth = self.processor.max_depth;
        if depth == 0 {
            return Err(ConfigError::Validation(
                "processor.max_depth must be greater than 0".to_owned(),
            ));
        }
        if depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Validation(format!(
                "processor.max_depth cannot exceed {MAX_DEPTH_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Build a registry from this configuration.
    ///
    /// Built-ins come first (when enabled); file entries replace built-ins of
    /// the same name.
    #[must_use]
    pub fn registry(&self) -> ShortcodeRegistry {
        let mut registry = ShortcodeRegistry::new();
        if self.registry.builtins {
            register_builtins(&mut registry);
        }
        for (name, entry) in &self.shortcodes {
            registry.register(name, entry.descriptor());
        }
        tracing::debug!(shortcodes = registry.len(), "Registry built");
        registry
    }

    /// Processor settings from the `[processor]` section.
    #[must_use]
    pub fn processor_config(&self) -> ProcessorConfig {
        ProcessorConfig::new()
            .with_validate(self.processor.validate)
            .with_unknown(self.processor.unknown)
            .with_max_depth(self.processor.max_depth)
    }
}

fn validate_entry(name: &str, entry: &ShortcodeEntry) -> Result<(), ConfigError> {
    if !is_valid_name(name) {
        return Err(ConfigError::Validation(format!(
            "shortcodes.{name}: invalid shortcode name"
        )));
    }
    require_non_empty(&entry.category, &format!("shortcodes.{name}.category"))?;

    let Some(schema) = &entry.schema else {
        return Ok(());
    };

    for required in &schema.required {
        require_non_empty(required, &format!("shortcodes.{name}.schema.required"))?;
    }

    for (attr, spec) in &schema.attributes {
        let field = format!("shortcodes.{name}.schema.attributes.{attr}");
        require_non_empty(attr, &field)?;

        let Some(default) = &spec.default_value else {
            continue;
        };
        if let Some(expected) = spec.expected_type
            && default.attr_type() != expected
        {
            return Err(ConfigError::Validation(format!(
                "{field}.default must be of type {expected}"
            )));
        }
        if let Some(allowed) = &spec.allowed_values {
            let value = default.to_string();
            if !allowed.contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{field}.default \"{value}\" is not one of the allowed values"
                )));
            }
        }
    }

    Ok(())
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shortcode_engine::{AttrType, AttrValue, ShortcodeProcessor};
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.processor.validate);
        assert_eq!(config.processor.unknown, UnknownPolicy::Placeholder);
        assert_eq!(config.processor.max_depth, 10);
        assert!(config.registry.builtins);
        assert!(config.shortcodes.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.processor.validate);
        assert!(config.registry.builtins);
    }

    #[test]
    fn test_parse_processor_config() {
        let toml = r#"
[processor]
validate = false
unknown = "remove"
max_depth = 3
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.processor.validate);
        assert_eq!(config.processor.unknown, UnknownPolicy::Remove);
        assert_eq!(config.processor.max_depth, 3);
    }

    #[test]
    fn test_parse_unknown_policy_rejects_other_values() {
        let toml = r#"
[processor]
unknown = "explode"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_parse_shortcodes() {
        let toml = r#"
[shortcodes.product]
description = "Product card"
icon = "shopping-bag"
category = "commerce"

[shortcodes.product.schema]
required = ["id"]

[shortcodes.product.schema.attributes.id]
type = "number"
description = "Product id"

[shortcodes.product.schema.attributes.layout]
allowed = ["card", "row"]
default = "card"

[shortcodes.note]
has_content = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let names: Vec<&str> = config.shortcodes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["product", "note"]);

        let product = &config.shortcodes["product"];
        assert_eq!(product.description, "Product card");
        assert_eq!(product.icon.as_deref(), Some("shopping-bag"));
        assert_eq!(product.category, "commerce");
        assert!(!product.has_content);

        let schema = product.schema.as_ref().unwrap();
        assert_eq!(schema.required, vec!["id"]);
        assert_eq!(
            schema.attributes["id"].expected_type,
            Some(AttrType::Number)
        );
        assert_eq!(
            schema.attributes["layout"].default_value,
            Some(AttrValue::String("card".to_owned()))
        );

        let note = &config.shortcodes["note"];
        assert_eq!(note.category, "custom");
        assert!(note.has_content);
        assert!(note.schema.is_none());
    }

    #[test]
    fn test_template_follows_declaration_order() {
        let toml = r#"
[registry]
builtins = false

[shortcodes.product.schema]
required = ["sku"]

[shortcodes.product.schema.attributes.sku]
description = "Stock keeping unit"

[shortcodes.product.schema.attributes.layout]
default = "card"

[shortcodes.product.schema.attributes.columns]
type = "number"
default = 2

[shortcodes.product.schema.attributes.badge]
default = "new"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let registry = config.registry();
        assert_eq!(
            registry.lookup("product").unwrap().template("product"),
            r#"[product sku="" layout="card" columns=2 badge="new"]"#
        );
    }

    #[test]
    fn test_parse_numeric_and_bool_defaults() {
        let toml = r#"
[shortcodes.grid.schema.attributes.columns]
type = "number"
default = 4

[shortcodes.grid.schema.attributes.lazy]
type = "boolean"
default = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let schema = config.shortcodes["grid"].schema.as_ref().unwrap();
        assert_eq!(
            schema.attributes["columns"].default_value,
            Some(AttrValue::Number(4.0))
        );
        assert_eq!(
            schema.attributes["lazy"].default_value,
            Some(AttrValue::Bool(true))
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_default_config_passes() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_validate_max_depth_zero() {
        let mut config = Config::default();
        config.processor.max_depth = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("max_depth"));
    }

    #[test]
    fn test_validate_max_depth_too_high() {
        let mut config = Config::default();
        config.processor.max_depth = 101;
        assert!(config.validate().unwrap_err().to_string().contains("100"));
    }

    #[test]
    fn test_validate_invalid_name() {
        let toml = r#"
[shortcodes."my shortcode"]
description = "Spaces are not allowed"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: shortcodes.my shortcode: invalid shortcode name"
        );
    }

    #[test]
    fn test_validate_empty_required_name() {
        let toml = r#"
[shortcodes.product.schema]
required = [""]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("shortcodes.product.schema.required"));
    }

    #[test]
    fn test_validate_default_outside_allowed() {
        let toml = r#"
[shortcodes.button.schema.attributes.style]
allowed = ["primary", "secondary"]
default = "loud"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("\"loud\" is not one of the allowed values"));
    }

    #[test]
    fn test_validate_default_type_mismatch() {
        let toml = r#"
[shortcodes.grid.schema.attributes.columns]
type = "number"
default = "three"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must be of type number"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            builtins: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.registry.builtins);
        assert!(config.processor.validate); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());

        assert!(config.registry.builtins);
        assert!(config.processor.validate);
    }

    #[test]
    fn test_registry_with_builtins_and_overrides() {
        let toml = r#"
[shortcodes.gallery]
description = "Slideshow"
category = "media"

[shortcodes.product]
description = "Product card"
category = "commerce"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let registry = config.registry();

        assert!(registry.contains("button"));
        assert!(registry.contains("product"));
        assert_eq!(
            registry.lookup("gallery").map(|d| d.description.as_str()),
            Some("Slideshow")
        );
        assert!(registry.lookup("gallery").unwrap().schema.is_none());
    }

    #[test]
    fn test_registry_without_builtins() {
        let toml = r#"
[registry]
builtins = false

[shortcodes.product]
description = "Product card"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let registry = config.registry();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.categories(), vec!["custom"]);
    }

    #[test]
    fn test_processor_config() {
        let toml = r#"
[processor]
unknown = "keep"
max_depth = 2
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let registry = config.registry();
        let processor_config = config.processor_config();
        assert_eq!(processor_config.unknown, UnknownPolicy::Keep);
        assert_eq!(processor_config.max_depth, 2);

        let mut processor = ShortcodeProcessor::with_config(&registry, processor_config);
        assert_eq!(processor.process("a [mystery] b"), "a [mystery] b");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[registry]
builtins = false
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert!(!config.registry.builtins);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[processor]\nvalidate = true\n").unwrap();

        let settings = CliSettings {
            validate: Some(false),
            builtins: None,
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert!(!config.processor.validate);
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[processor\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[processor]\nmax_depth = 0\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("content/pages");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            discover_config(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(discover_config(&nested), Some(nested.join(CONFIG_FILENAME)));
    }
}
