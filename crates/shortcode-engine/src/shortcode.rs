//! Parsed shortcode records.

use std::ops::Range;

use crate::attrs::{AttrValue, Attributes};

/// Half-open byte range `[start, end)` of a match in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end > start, "span must not be empty");
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A single shortcode occurrence found by the scanner.
///
/// Records are immutable values; they carry the exact source text and its
/// span so callers can rebuild or replace the original text without
/// re-scanning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Shortcode {
    name: String,
    attributes: Attributes,
    inner_text: Option<String>,
    source_text: String,
    span: Span,
}

impl Shortcode {
    pub(crate) fn new(
        name: String,
        attributes: Attributes,
        inner_text: Option<String>,
        source_text: String,
        span: Span,
    ) -> Self {
        Self {
            name,
            attributes,
            inner_text,
            source_text,
            span,
        }
    }

    /// Lowercased shortcode name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Get an attribute value by (lowercase) key.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Raw text between the opening and closing tags of a paired shortcode.
    #[must_use]
    pub fn inner_text(&self) -> Option<&str> {
        self.inner_text.as_deref()
    }

    /// True when no closing tag was paired with the opening tag.
    #[must_use]
    pub fn is_self_closing(&self) -> bool {
        self.inner_text.is_none()
    }

    /// Exact matched substring of the scanned text.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }
}
