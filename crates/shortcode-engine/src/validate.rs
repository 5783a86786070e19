//! Shortcode validation against declarative schemas.
//!
//! Validation never fails: problems are accumulated as messages in a
//! [`ValidationResult`] so an editor can show all of them at once.

use indexmap::IndexMap;

use crate::attrs::{AttrType, AttrValue, Attributes};
use crate::scanner::{is_valid_name, scan_shortcodes};

/// Attribute schema of a shortcode.
///
/// Schemas are permissive: attributes that are not declared pass validation.
///
/// # Example
///
/// ```
/// use shortcode_engine::{AttrSpec, AttrType, Schema};
///
/// let schema = Schema::new()
///     .require("id")
///     .attribute("id", AttrSpec::new().of_type(AttrType::Number))
///     .attribute("size", AttrSpec::new().allowed(["small", "medium"]).with_default("medium"));
///
/// assert_eq!(schema.required, vec!["id"]);
/// assert!(schema.attr_spec("size").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Schema {
    /// Attribute names that must be present.
    pub required: Vec<String>,
    /// Per-attribute rules, keyed by lowercase attribute name.
    pub attributes: IndexMap<String, AttrSpec>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required attribute name.
    #[must_use]
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Declare rules for an attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, spec: AttrSpec) -> Self {
        self.attributes.insert(name.into(), spec);
        self
    }

    /// Look up the rules for an attribute (case-insensitive).
    #[must_use]
    pub fn attr_spec(&self, name: &str) -> Option<&AttrSpec> {
        self.attributes.get(name).or_else(|| {
            self.attributes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, spec)| spec)
        })
    }

    /// Fill attributes that are absent with their declared defaults.
    ///
    /// Present attributes are never overwritten.
    pub fn apply_defaults(&self, attributes: &mut Attributes) {
        for (name, spec) in &self.attributes {
            let Some(default) = &spec.default_value else {
                continue;
            };
            let key = name.to_lowercase();
            if !attributes.contains_key(&key) {
                attributes.insert(key, default.clone());
            }
        }
    }
}

/// Rules for a single attribute.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AttrSpec {
    /// Expected runtime type of the coerced value.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub expected_type: Option<AttrType>,
    /// Allowed values, compared against the value's string form.
    #[cfg_attr(feature = "serde", serde(rename = "allowed"))]
    pub allowed_values: Option<Vec<String>>,
    /// Value used when the attribute is absent.
    #[cfg_attr(feature = "serde", serde(rename = "default"))]
    pub default_value: Option<AttrValue>,
    /// Human-readable description for the authoring UI.
    pub description: Option<String>,
}

impl AttrSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn of_type(mut self, expected: AttrType) -> Self {
        self.expected_type = Some(expected);
        self
    }

    #[must_use]
    pub fn allowed<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<AttrValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Outcome of a validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Messages in the order the problems were found.
    pub errors: Vec<String>,
}

impl ValidationResult {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a shortcode name and its attributes against an optional schema.
///
/// The name is always checked. With a schema, missing required attributes,
/// type mismatches and values outside `allowed` are reported; undeclared
/// attributes are accepted. All problems are collected.
///
/// # Example
///
/// ```
/// use shortcode_engine::{Schema, parse_attributes, validate};
///
/// let schema = Schema::new().require("id");
/// let result = validate("image", &parse_attributes(r#"foo="bar""#), Some(&schema));
/// assert!(!result.is_valid);
/// assert!(result.errors[0].contains("id"));
/// ```
#[must_use]
pub fn validate(name: &str, attributes: &Attributes, schema: Option<&Schema>) -> ValidationResult {
    let mut errors = Vec::new();

    if !is_valid_name(name) {
        errors.push(format!("Invalid shortcode name: \"{name}\""));
    }

    let Some(schema) = schema else {
        return ValidationResult::from_errors(errors);
    };

    for required in &schema.required {
        if !attributes.contains_key(required.to_lowercase().as_str()) {
            errors.push(format!("Missing required attribute: {required}"));
        }
    }

    for (key, value) in attributes {
        let Some(spec) = schema.attr_spec(key) else {
            continue;
        };

        if let Some(expected) = spec.expected_type
            && value.attr_type() != expected
        {
            errors.push(format!(
                "Attribute \"{key}\" must be of type {expected}, got {}",
                value.attr_type()
            ));
        }

        if let Some(allowed) = &spec.allowed_values {
            let actual = value.to_string();
            if !allowed.iter().any(|candidate| *candidate == actual) {
                errors.push(format!(
                    "Attribute \"{key}\" must be one of: {} (got \"{actual}\")",
                    allowed.join(", ")
                ));
            }
        }
    }

    ValidationResult::from_errors(errors)
}

/// Check that a raw string holds well-formed shortcode syntax.
///
/// Used by the inserter before accepting hand-typed text: rejects empty input,
/// unbalanced square brackets, and text in which no shortcode is recognized.
#[must_use]
pub fn validate_source(source: &str) -> ValidationResult {
    if source.trim().is_empty() {
        return ValidationResult::from_errors(vec!["Shortcode cannot be empty".to_owned()]);
    }

    let mut errors = Vec::new();

    let opening = source.matches('[').count();
    let closing = source.matches(']').count();
    if opening != closing {
        errors.push(format!(
            "Mismatched brackets: {opening} opening, {closing} closing"
        ));
    }

    if scan_shortcodes(source).is_empty() {
        errors.push("Invalid shortcode syntax".to_owned());
    }

    ValidationResult::from_errors(errors)
}
