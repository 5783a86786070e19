//! Render context.
//!
//! Source location, resolved attributes and the optional data client handed to renderers.

use std::io;
use std::path::Path;

use crate::attrs::{AttrValue, Attributes};

/// Data client callback: fetches a resource (an API path, a record id) as text.
pub type FetchFn = dyn Fn(&str) -> io::Result<String> + Send + Sync;

/// Context provided to a [`ShortcodeRenderer`](super::ShortcodeRenderer).
///
/// # Example
///
/// ```
/// use shortcode_engine::{Attributes, AttrValue, RenderContext};
///
/// let mut attributes = Attributes::new();
/// attributes.insert("size".to_owned(), AttrValue::from("medium"));
///
/// let ctx = RenderContext {
///     source_path: None,
///     line: 3,
///     attributes: &attributes,
///     fetch: None,
/// };
///
/// assert_eq!(ctx.attr_str("size"), Some("medium"));
/// assert!(ctx.fetch("/api/products").is_err());
/// ```
pub struct RenderContext<'a> {
    /// Path to the document being rendered (if known).
    pub source_path: Option<&'a Path>,
    /// Line where the shortcode starts (1-indexed).
    pub line: usize,
    /// Shortcode attributes with schema defaults filled in.
    pub attributes: &'a Attributes,
    /// Data client, when the host provides one.
    pub fetch: Option<&'a FetchFn>,
}

impl RenderContext<'_> {
    /// Get a resolved attribute.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Get a resolved string attribute.
    #[must_use]
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(AttrValue::as_str)
    }

    /// Fetch a resource through the data client.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` when no client is configured, or the client's error.
    pub fn fetch(&self, resource: &str) -> io::Result<String> {
        match self.fetch {
            Some(fetch) => fetch(resource),
            None => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "no data client configured",
            )),
        }
    }
}
