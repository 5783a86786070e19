//! Span-based replacement of shortcodes in text.

use crate::scanner::Scanner;
use crate::shortcode::{Shortcode, Span};

/// Collects span edits and applies them to the text they were computed on.
///
/// Edits are applied rightmost first, so the offsets of the remaining edits
/// stay valid while the string changes length.
///
/// # Example
///
/// ```
/// use shortcode_engine::{Replacements, Span};
///
/// let mut text = "[a/] mid [b/]".to_owned();
/// let mut replacements = Replacements::new();
/// replacements.add(Span::new(0, 4), "X");
/// replacements.add(Span::new(9, 13), "YY");
/// replacements.apply(&mut text);
///
/// assert_eq!(text, "X mid YY");
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    items: Vec<(Span, String)>,
}

impl Replacements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue replacing the text at `span` with `to`. Spans must not overlap.
    pub fn add(&mut self, span: Span, to: impl Into<String>) {
        self.items.push((span, to.into()));
    }

    /// Rewrite `text` in place. Consumes the collector.
    pub fn apply(mut self, text: &mut String) {
        if self.items.is_empty() {
            return;
        }

        self.items.sort_by(|a, b| b.0.start.cmp(&a.0.start));
        for (span, to) in self.items {
            text.replace_range(span.range(), &to);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of queued edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Replace every shortcode in `text` with the string `replacer` returns for it.
///
/// The text is scanned once. Returning [`Shortcode::source_text`] leaves a
/// shortcode unchanged.
///
/// # Example
///
/// ```
/// use shortcode_engine::replace_all;
///
/// let out = replace_all("[a/] mid [b/]", |sc| match sc.name() {
///     "a" => "X".to_owned(),
///     _ => "YY".to_owned(),
/// });
/// assert_eq!(out, "X mid YY");
/// ```
pub fn replace_all<F>(text: &str, mut replacer: F) -> String
where
    F: FnMut(&Shortcode) -> String,
{
    let mut replacements = Replacements::new();
    for shortcode in Scanner::new(text) {
        replacements.add(shortcode.span(), replacer(&shortcode));
    }

    let mut output = text.to_owned();
    replacements.apply(&mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::serialize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_replacements() {
        let mut text = "unchanged".to_owned();
        let replacements = Replacements::new();
        assert!(replacements.is_empty());
        replacements.apply(&mut text);
        assert_eq!(text, "unchanged");
    }

    #[test]
    fn test_out_of_order_adds() {
        let mut text = "0123456789".to_owned();
        let mut replacements = Replacements::new();
        replacements.add(Span::new(1, 2), "one");
        replacements.add(Span::new(8, 9), "eight");
        replacements.add(Span::new(4, 6), "");
        assert_eq!(replacements.len(), 3);
        replacements.apply(&mut text);
        assert_eq!(text, "0one2367eight9");
    }

    #[test]
    fn test_replace_all_different_lengths() {
        let out = replace_all("[a/] mid [b/]", |sc| {
            if sc.name() == "a" {
                "X".to_owned()
            } else {
                "YY".to_owned()
            }
        });
        assert_eq!(out, "X mid YY");
    }

    #[test]
    fn test_replace_all_growing_replacements() {
        let out = replace_all("x[a]y[b]z", |sc| format!("<{}-expanded>", sc.name()));
        assert_eq!(out, "x<a-expanded>y<b-expanded>z");
    }

    #[test]
    fn test_replace_all_noop_keeps_text() {
        let text = "Intro [gallery ids=\"1,2\"] and [quote]Hi[/quote] outro";
        let out = replace_all(text, |sc| sc.source_text().to_owned());
        assert_eq!(out, text);
    }

    #[test]
    fn test_replace_all_sees_inner_text() {
        let out = replace_all("[upper]shout[/upper]!", |sc| {
            sc.inner_text().unwrap_or_default().to_uppercase()
        });
        assert_eq!(out, "SHOUT!");
    }

    #[test]
    fn test_replace_all_canonicalizes() {
        let out = replace_all("See [IMG Src='a.png' Lazy=false]", serialize);
        assert_eq!(out, r#"See [img src="a.png"]"#);
    }

    #[test]
    fn test_replace_all_without_shortcodes() {
        let mut calls = 0;
        let out = replace_all("plain [text", |_| {
            calls += 1;
            String::new()
        });
        assert_eq!(out, "plain [text");
        assert_eq!(calls, 0);
    }
}
