//! Shortcode processor.
//!
//! Replaces shortcodes in a document with the output of their registered renderers.

use std::io;
use std::path::PathBuf;

use crate::attrs::Attributes;
use crate::registry::ShortcodeRegistry;
use crate::replace::Replacements;
use crate::scanner::Scanner;
use crate::shortcode::Shortcode;
use crate::util::{LineCounter, escape_html};
use crate::validate::validate;

use super::{FetchFn, RenderContext, RenderOutput};

/// What to do with shortcodes whose name is not registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum UnknownPolicy {
    /// Replace with an "unknown shortcode" placeholder element.
    #[default]
    Placeholder,
    /// Leave the source text untouched.
    Keep,
    /// Drop the shortcode from the output.
    Remove,
}

/// Configuration for the shortcode processor.
pub struct ProcessorConfig {
    /// Validate shortcodes against registered schemas before rendering.
    ///
    /// Default: `true`
    pub validate: bool,
    /// Handling of unregistered names.
    pub unknown: UnknownPolicy,
    /// Maximum nesting of [`RenderOutput::Content`] re-processing.
    ///
    /// Default: 10
    pub max_depth: usize,
    /// Path to the document being rendered (if known).
    pub source_path: Option<PathBuf>,
    /// Data client passed to renderers.
    pub fetch: Option<Box<FetchFn>>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            validate: true,
            unknown: UnknownPolicy::default(),
            max_depth: 10,
            source_path: None,
            fetch: None,
        }
    }

    /// Enable or disable schema validation.
    #[must_use]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Set the handling of unknown shortcodes.
    #[must_use]
    pub fn with_unknown(mut self, unknown: UnknownPolicy) -> Self {
        self.unknown = unknown;
        self
    }

    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the source document path.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Set the data client callback.
    #[must_use]
    pub fn with_fetch<F>(mut self, fetch: F) -> Self
    where
        F: Fn(&str) -> io::Result<String> + Send + Sync + 'static,
    {
        self.fetch = Some(Box::new(fetch));
        self
    }

    fn create_context<'a>(&'a self, line: usize, attributes: &'a Attributes) -> RenderContext<'a> {
        RenderContext {
            source_path: self.source_path.as_deref(),
            line,
            attributes,
            fetch: self.fetch.as_deref(),
        }
    }
}

/// Renders shortcodes in a document through a registry.
///
/// The registry is borrowed read-only, so several processors can share one.
///
/// # Example
///
/// ```
/// use shortcode_engine::{
///     RenderContext, RenderOutput, Shortcode, ShortcodeDescriptor, ShortcodeProcessor,
///     ShortcodeRegistry,
/// };
///
/// fn kbd(shortcode: &Shortcode, _ctx: &RenderContext<'_>) -> RenderOutput {
///     RenderOutput::html(format!("<kbd>{}</kbd>", shortcode.inner_text().unwrap_or_default()))
/// }
///
/// let mut registry = ShortcodeRegistry::new();
/// registry.register(
///     "kbd",
///     ShortcodeDescriptor::new("Keyboard key", "text").with_renderer(kbd),
/// );
///
/// let mut processor = ShortcodeProcessor::new(&registry);
/// let output = processor.process("Press [kbd]Ctrl+C[/kbd] to copy.");
/// assert_eq!(output, "Press <kbd>Ctrl+C</kbd> to copy.");
/// ```
pub struct ShortcodeProcessor<'r> {
    registry: &'r ShortcodeRegistry,
    config: ProcessorConfig,
    warnings: Vec<String>,
}

impl<'r> ShortcodeProcessor<'r> {
    /// Create a processor with default configuration.
    #[must_use]
    pub fn new(registry: &'r ShortcodeRegistry) -> Self {
        Self::with_config(registry, ProcessorConfig::default())
    }

    /// Create a processor with custom configuration.
    #[must_use]
    pub fn with_config(registry: &'r ShortcodeRegistry, config: ProcessorConfig) -> Self {
        Self {
            registry,
            config,
            warnings: Vec::new(),
        }
    }

    /// Render every shortcode in `input`.
    ///
    /// Shortcodes without a renderer, or whose renderer skips them, keep
    /// their source text.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        self.process_with_depth(input, 0)
    }

    /// Warnings collected so far: unknown names, schema violations, depth overflow.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn process_with_depth(&mut self, input: &str, depth: usize) -> String {
        if depth > self.config.max_depth {
            tracing::warn!(max_depth = self.config.max_depth, "Shortcode nesting too deep");
            self.warnings.push(format!(
                "Maximum nesting depth ({}) exceeded",
                self.config.max_depth
            ));
            return input.to_owned();
        }

        let mut replacements = Replacements::new();
        let mut lines = LineCounter::new(input);
        for shortcode in Scanner::new(input) {
            let line = lines.line_at(shortcode.span().start);
            if let Some(output) = self.render_shortcode(&shortcode, line, depth) {
                replacements.add(shortcode.span(), output);
            }
        }

        let mut output = input.to_owned();
        replacements.apply(&mut output);
        output
    }

    /// Render one shortcode. `None` keeps the source text.
    fn render_shortcode(&mut self, shortcode: &Shortcode, line: usize, depth: usize) -> Option<String> {
        let registry = self.registry;
        let name = shortcode.name();

        let Some(descriptor) = registry.lookup(name) else {
            tracing::debug!(name, line, "Unknown shortcode");
            self.warnings
                .push(format!("line {line}: unknown shortcode [{name}]"));
            return match self.config.unknown {
                UnknownPolicy::Placeholder => Some(unknown_placeholder(shortcode)),
                UnknownPolicy::Keep => None,
                UnknownPolicy::Remove => Some(String::new()),
            };
        };

        if self.config.validate {
            let result = validate(name, shortcode.attributes(), descriptor.schema.as_ref());
            if !result.is_valid {
                for error in &result.errors {
                    self.warnings.push(format!("line {line}: [{name}] {error}"));
                }
                return Some(invalid_placeholder(shortcode, &result.errors));
            }
        }

        let renderer = descriptor.renderer.as_ref()?;

        let mut attributes = shortcode.attributes().clone();
        if let Some(schema) = &descriptor.schema {
            schema.apply_defaults(&mut attributes);
        }

        let output = {
            let ctx = self.config.create_context(line, &attributes);
            renderer.render(shortcode, &ctx)
        };

        match output {
            RenderOutput::Html(html) => Some(html),
            RenderOutput::Content(content) => Some(self.process_with_depth(&content, depth + 1)),
            RenderOutput::Skip => None,
        }
    }
}

fn unknown_placeholder(shortcode: &Shortcode) -> String {
    format!(
        r#"<span class="shortcode-unknown" data-shortcode="{}">{}</span>"#,
        escape_html(shortcode.name()),
        escape_html(shortcode.source_text())
    )
}

fn invalid_placeholder(shortcode: &Shortcode, errors: &[String]) -> String {
    format!(
        r#"<span class="shortcode-invalid" data-shortcode="{}" title="{}">{}</span>"#,
        escape_html(shortcode.name()),
        escape_html(&errors.join("; ")),
        escape_html(shortcode.source_text())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrType;
    use crate::registry::ShortcodeDescriptor;
    use crate::validate::{AttrSpec, Schema};
    use pretty_assertions::assert_eq;

    fn kbd(shortcode: &Shortcode, _ctx: &RenderContext<'_>) -> RenderOutput {
        RenderOutput::html(format!(
            "<kbd>{}</kbd>",
            shortcode.inner_text().unwrap_or_default()
        ))
    }

    fn image(_shortcode: &Shortcode, ctx: &RenderContext<'_>) -> RenderOutput {
        let id = ctx.attr("id").map(ToString::to_string).unwrap_or_default();
        let size = ctx.attr_str("size").unwrap_or("full");
        RenderOutput::html(format!(r#"<img data-id="{id}" class="size-{size}">"#))
    }

    fn note(shortcode: &Shortcode, _ctx: &RenderContext<'_>) -> RenderOutput {
        RenderOutput::content(format!(
            "<aside>{}</aside>",
            shortcode.inner_text().unwrap_or_default()
        ))
    }

    fn registry() -> ShortcodeRegistry {
        let mut registry = ShortcodeRegistry::new();
        registry.register(
            "kbd",
            ShortcodeDescriptor::new("Keyboard key", "text").with_renderer(kbd),
        );
        registry.register(
            "image",
            ShortcodeDescriptor::new("Image", "media")
                .with_schema(
                    Schema::new()
                        .require("id")
                        .attribute("id", AttrSpec::new().of_type(AttrType::Number))
                        .attribute(
                            "size",
                            AttrSpec::new()
                                .allowed(["thumbnail", "medium", "full"])
                                .with_default("medium"),
                        ),
                )
                .with_renderer(image),
        );
        registry.register(
            "note",
            ShortcodeDescriptor::new("Note box", "layout")
                .with_content()
                .with_renderer(note),
        );
        registry.register("gallery", ShortcodeDescriptor::new("Gallery", "media"));
        registry
    }

    #[test]
    fn test_renders_html() {
        let registry = registry();
        let mut processor = ShortcodeProcessor::new(&registry);

        let output = processor.process("Press [kbd]Ctrl+C[/kbd] then [kbd]Ctrl+V[/kbd].");
        assert_eq!(output, "Press <kbd>Ctrl+C</kbd> then <kbd>Ctrl+V</kbd>.");
        assert!(processor.warnings().is_empty());
    }

    #[test]
    fn test_defaults_reach_renderer() {
        let registry = registry();
        let mut processor = ShortcodeProcessor::new(&registry);

        let output = processor.process("[image id=7]");
        assert_eq!(output, r#"<img data-id="7" class="size-medium">"#);
    }

    #[test]
    fn test_unknown_placeholder() {
        let registry = registry();
        let mut processor = ShortcodeProcessor::new(&registry);

        let output = processor.process(r#"a [mystery x="<b>"] b"#);
        assert_eq!(
            output,
            r#"a <span class="shortcode-unknown" data-shortcode="mystery">[mystery x=&quot;&lt;b&gt;&quot;]</span> b"#
        );
        assert_eq!(processor.warnings(), ["line 1: unknown shortcode [mystery]"]);
    }

    #[test]
    fn test_unknown_keep_and_remove() {
        let registry = registry();

        let config = ProcessorConfig::new().with_unknown(UnknownPolicy::Keep);
        let mut keep = ShortcodeProcessor::with_config(&registry, config);
        assert_eq!(keep.process("x [mystery] y"), "x [mystery] y");

        let config = ProcessorConfig::new().with_unknown(UnknownPolicy::Remove);
        let mut remove = ShortcodeProcessor::with_config(&registry, config);
        assert_eq!(remove.process("x [mystery] y"), "x  y");
    }

    #[test]
    fn test_invalid_shortcode_placeholder() {
        let registry = registry();
        let mut processor = ShortcodeProcessor::new(&registry);

        let output = processor.process("one\ntwo [image size=huge]");
        assert!(output.starts_with("one\ntwo <span class=\"shortcode-invalid\""));
        assert!(output.contains("[image size=huge]</span>"));
        assert_eq!(
            processor.warnings(),
            [
                "line 2: [image] Missing required attribute: id",
                "line 2: [image] Attribute \"size\" must be one of: thumbnail, medium, full (got \"huge\")",
            ]
        );
    }

    #[test]
    fn test_warning_lines_across_document() {
        let registry = registry();
        let config = ProcessorConfig::new().with_unknown(UnknownPolicy::Keep);
        let mut processor = ShortcodeProcessor::with_config(&registry, config);

        let _ = processor.process("[a] [b]\n\n[c]\n[kbd]x[/kbd] [d]\n");
        assert_eq!(
            processor.warnings(),
            [
                "line 1: unknown shortcode [a]",
                "line 1: unknown shortcode [b]",
                "line 3: unknown shortcode [c]",
                "line 4: unknown shortcode [d]",
            ]
        );
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let registry = registry();
        let config = ProcessorConfig::new().with_validate(false);
        let mut processor = ShortcodeProcessor::with_config(&registry, config);

        let output = processor.process("[image size=thumbnail]");
        assert_eq!(output, r#"<img data-id="" class="size-thumbnail">"#);
        assert!(processor.warnings().is_empty());
    }

    #[test]
    fn test_registered_without_renderer_keeps_source() {
        let registry = registry();
        let mut processor = ShortcodeProcessor::new(&registry);

        let output = processor.process(r#"[gallery ids="1,2"]"#);
        assert_eq!(output, r#"[gallery ids="1,2"]"#);
    }

    #[test]
    fn test_content_is_reprocessed() {
        let registry = registry();
        let mut processor = ShortcodeProcessor::new(&registry);

        let output = processor.process("[note]Press [kbd]Esc[/kbd][/note]");
        assert_eq!(output, "<aside>Press <kbd>Esc</kbd></aside>");
    }

    #[test]
    fn test_nesting_depth_limit() {
        fn recurse(_shortcode: &Shortcode, _ctx: &RenderContext<'_>) -> RenderOutput {
            RenderOutput::content("[loop]")
        }

        let mut registry = ShortcodeRegistry::new();
        registry.register(
            "loop",
            ShortcodeDescriptor::new("Loops", "test").with_renderer(recurse),
        );

        let config = ProcessorConfig::new().with_max_depth(3);
        let mut processor = ShortcodeProcessor::with_config(&registry, config);

        let output = processor.process("[loop]");
        assert_eq!(output, "[loop]");
        assert!(
            processor
                .warnings()
                .iter()
                .any(|w| w.contains("Maximum nesting depth"))
        );
    }

    #[test]
    fn test_fetch_reaches_renderer() {
        fn product(shortcode: &Shortcode, ctx: &RenderContext<'_>) -> RenderOutput {
            let id = shortcode.attr("id").map(ToString::to_string).unwrap_or_default();
            match ctx.fetch(&format!("/products/{id}")) {
                Ok(name) => RenderOutput::html(format!("<b>{name}</b>")),
                Err(_) => RenderOutput::Skip,
            }
        }

        let mut registry = ShortcodeRegistry::new();
        registry.register(
            "product",
            ShortcodeDescriptor::new("Product name", "commerce").with_renderer(product),
        );

        let config = ProcessorConfig::new()
            .with_source_path("shop.txt")
            .with_fetch(|resource| Ok(format!("Widget from {resource}")));
        let mut processor = ShortcodeProcessor::with_config(&registry, config);
        assert_eq!(
            processor.process("[product id=3]"),
            "<b>Widget from /products/3</b>"
        );

        let mut offline = ShortcodeProcessor::new(&registry);
        assert_eq!(offline.process("[product id=3]"), "[product id=3]");
    }

    #[test]
    fn test_config_builder() {
        let config = ProcessorConfig::new()
            .with_validate(false)
            .with_unknown(UnknownPolicy::Remove)
            .with_max_depth(5)
            .with_source_path("/docs/page.txt");

        assert!(!config.validate);
        assert_eq!(config.unknown, UnknownPolicy::Remove);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.source_path, Some(PathBuf::from("/docs/page.txt")));
        assert!(config.fetch.is_none());
    }
}
