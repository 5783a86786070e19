//! Registry of known shortcodes.
//!
//! Maps lowercase shortcode names to descriptors holding authoring metadata
//! (description, icon, category), an optional attribute schema and an optional
//! renderer. The registry is a plain value passed to whoever needs it.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::attrs::{AttrValue, Attributes};
use crate::render::ShortcodeRenderer;
use crate::scanner::is_valid_name;
use crate::serialize::format_shortcode;
use crate::shortcode::Shortcode;
use crate::validate::{Schema, ValidationResult, validate};

/// Metadata and behavior registered for one shortcode name.
#[derive(Clone)]
pub struct ShortcodeDescriptor {
    /// One-line summary shown in pickers and search results.
    pub description: String,
    /// Icon identifier for the authoring UI.
    pub icon: Option<String>,
    /// Grouping key for [`ShortcodeRegistry::list_by_category`].
    pub category: String,
    /// Attribute rules checked by [`ShortcodeRegistry::validate`].
    pub schema: Option<Schema>,
    /// Whether the shortcode is normally written in paired form.
    pub has_content: bool,
    /// Renderer used by the processor. `None` keeps the source text.
    pub renderer: Option<Arc<dyn ShortcodeRenderer>>,
}

impl fmt::Debug for ShortcodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcodeDescriptor")
            .field("description", &self.description)
            .field("icon", &self.icon)
            .field("category", &self.category)
            .field("schema", &self.schema)
            .field("has_content", &self.has_content)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

impl ShortcodeDescriptor {
    #[must_use]
    pub fn new(description: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            icon: None,
            category: category.into(),
            schema: None,
            has_content: false,
            renderer: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Mark the shortcode as taking inner text.
    #[must_use]
    pub fn with_content(mut self) -> Self {
        self.has_content = true;
        self
    }

    #[must_use]
    pub fn with_renderer<R: ShortcodeRenderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Build the insertion template for this shortcode.
    ///
    /// Contains every required attribute and every attribute with a default,
    /// in schema declaration order. Required attributes without a default get
    /// an empty value. Paired when the shortcode takes content.
    ///
    /// # Example
    ///
    /// ```
    /// use shortcode_engine::{AttrSpec, Schema, ShortcodeDescriptor};
    ///
    /// let descriptor = ShortcodeDescriptor::new("Button", "layout")
    ///     .with_content()
    ///     .with_schema(
    ///         Schema::new()
    ///             .require("url")
    ///             .attribute("style", AttrSpec::new().with_default("primary")),
    ///     );
    ///
    /// assert_eq!(descriptor.template("button"), r#"[button url="" style="primary"][/button]"#);
    /// ```
    #[must_use]
    pub fn template(&self, name: &str) -> String {
        let mut attributes = Attributes::new();

        if let Some(schema) = &self.schema {
            for (key, spec) in &schema.attributes {
                let required = schema
                    .required
                    .iter()
                    .any(|r| r.eq_ignore_ascii_case(key));
                match &spec.default_value {
                    Some(default) => {
                        attributes.insert(key.to_lowercase(), default.clone());
                    }
                    None if required => {
                        attributes.insert(key.to_lowercase(), AttrValue::String(String::new()));
                    }
                    None => {}
                }
            }
            for required in &schema.required {
                attributes
                    .entry(required.to_lowercase())
                    .or_insert_with(|| AttrValue::String(String::new()));
            }
        }

        let inner = self.has_content.then_some("");
        format_shortcode(&name.to_lowercase(), &attributes, inner)
    }
}

/// Shortcode names and their descriptors, in registration order.
///
/// # Example
///
/// ```
/// use shortcode_engine::{ShortcodeDescriptor, ShortcodeRegistry};
///
/// let mut registry = ShortcodeRegistry::new();
/// registry.register("Gallery", ShortcodeDescriptor::new("Image gallery", "media"));
///
/// assert!(registry.contains("gallery"));
/// assert_eq!(registry.search("image").len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShortcodeRegistry {
    entries: IndexMap<String, ShortcodeDescriptor>,
}

impl ShortcodeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under `name` (stored lowercase).
    ///
    /// Returns the descriptor previously registered under that name. Names
    /// outside the shortcode name grammar are ignored.
    pub fn register(
        &mut self,
        name: &str,
        descriptor: ShortcodeDescriptor,
    ) -> Option<ShortcodeDescriptor> {
        if !is_valid_name(name) {
            tracing::warn!(name, "Ignoring shortcode with invalid name");
            return None;
        }

        let key = name.to_lowercase();
        let previous = self.entries.insert(key, descriptor);
        if previous.is_some() {
            tracing::warn!(name, "Shortcode registered twice, keeping the later one");
        }
        previous
    }

    /// Look up a descriptor by name (case-insensitive).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ShortcodeDescriptor> {
        self.entries.get(name.to_lowercase().as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Case-insensitive substring search over names and descriptions.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<(&str, &ShortcodeDescriptor)> {
        let query = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|(name, descriptor)| {
                query.is_empty()
                    || name.contains(&query)
                    || descriptor.description.to_lowercase().contains(&query)
            })
            .map(|(name, descriptor)| (name.as_str(), descriptor))
            .collect()
    }

    /// Entries whose category equals `category` (case-insensitive).
    #[must_use]
    pub fn list_by_category(&self, category: &str) -> Vec<(&str, &ShortcodeDescriptor)> {
        self.entries
            .iter()
            .filter(|(_, descriptor)| descriptor.category.eq_ignore_ascii_case(category))
            .map(|(name, descriptor)| (name.as_str(), descriptor))
            .collect()
    }

    #[must_use]
    pub fn list_all(&self) -> Vec<(&str, &ShortcodeDescriptor)> {
        self.entries
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
            .collect()
    }

    /// Distinct categories in first-registration order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for descriptor in self.entries.values() {
            if !categories.contains(&descriptor.category.as_str()) {
                categories.push(&descriptor.category);
            }
        }
        categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate a parsed shortcode against its registered schema.
    ///
    /// Unregistered names are reported as an error.
    #[must_use]
    pub fn validate(&self, shortcode: &Shortcode) -> ValidationResult {
        match self.lookup(shortcode.name()) {
            Some(descriptor) => validate(
                shortcode.name(),
                shortcode.attributes(),
                descriptor.schema.as_ref(),
            ),
            None => ValidationResult::from_errors(vec![format!(
                "Unknown shortcode: {}",
                shortcode.name()
            )]),
        }
    }
}
