//! Bracket shortcode engine.
//!
//! Finds WordPress-style shortcodes (`[name attr="value"]` and
//! `[name]inner[/name]`) in plain text, validates them against declarative
//! schemas, and writes them back out.
//!
//! # Architecture
//!
//! - [`Scanner`] / [`scan_shortcodes`]: locate shortcodes with byte spans
//! - [`parse_attributes`]: tokenize and coerce attribute lists
//! - [`validate`] / [`validate_source`]: schema and syntax checks
//! - [`serialize`], [`replace_all`], [`escape`]: text transforms
//! - [`ShortcodeRegistry`]: known names with metadata, schemas and renderers
//! - [`ShortcodeProcessor`]: render a document through registry renderers
//!
//! Shortcodes do not nest: inner text is returned raw, and a renderer that
//! wants nested shortcodes returns [`RenderOutput::Content`] so the processor
//! scans its output again.
//!
//! # Example
//!
//! ```
//! use shortcode_engine::{AttrValue, ShortcodeRegistry, register_builtins, scan_shortcodes};
//!
//! let text = r#"Intro [gallery ids="1,2,3" columns=4] and [button url="/buy"]Buy[/button]"#;
//! let found = scan_shortcodes(text);
//!
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[0].attr("columns"), Some(&AttrValue::Number(4.0)));
//! assert_eq!(found[1].inner_text(), Some("Buy"));
//!
//! let mut registry = ShortcodeRegistry::new();
//! register_builtins(&mut registry);
//! assert!(found.iter().all(|sc| registry.validate(sc).is_valid));
//! ```

mod attrs;
mod builtin;
mod escape;
mod registry;
pub mod render;
mod replace;
mod scanner;
mod serialize;
mod shortcode;
mod util;
mod validate;

pub use attrs::{AttrType, AttrValue, Attributes, parse_attributes};
pub use builtin::register_builtins;
pub use escape::{escape, unescape};
pub use registry::{ShortcodeDescriptor, ShortcodeRegistry};
pub use render::{
    FetchFn, ProcessorConfig, RenderContext, RenderOutput, ShortcodeProcessor, ShortcodeRenderer,
    UnknownPolicy,
};
pub use replace::{Replacements, replace_all};
pub use scanner::{Scanner, is_valid_name, scan_shortcodes};
pub use serialize::{format_shortcode, serialize};
pub use shortcode::{Shortcode, Span};
pub use util::{LineCounter, escape_html, line_at};
pub use validate::{AttrSpec, Schema, ValidationResult, validate, validate_source};
