//! Canonical shortcode text.

use std::fmt::Write as _;

use crate::attrs::{AttrValue, Attributes};
use crate::shortcode::Shortcode;

/// Rebuild canonical text for a parsed shortcode.
///
/// Attributes are written in map order. `true` flags are written bare and
/// `false` flags are dropped, so an explicit `flag="false"` does not survive
/// a parse/serialize cycle; absence reads as false.
///
/// # Example
///
/// ```
/// use shortcode_engine::{scan_shortcodes, serialize};
///
/// let found = scan_shortcodes("[Button URL='/go' Primary Disabled=false]Go[/button]");
/// assert_eq!(serialize(&found[0]), r#"[button url="/go" primary]Go[/button]"#);
/// ```
#[must_use]
pub fn serialize(shortcode: &Shortcode) -> String {
    format_shortcode(
        shortcode.name(),
        shortcode.attributes(),
        shortcode.inner_text(),
    )
}

/// Write shortcode text from its parts.
///
/// With `inner` the paired form `[name ...]inner[/name]` is produced,
/// otherwise the self-closing form `[name ...]`.
#[must_use]
pub fn format_shortcode(name: &str, attributes: &Attributes, inner: Option<&str>) -> String {
    let mut out = String::with_capacity(name.len() + 2 + attributes.len() * 12);
    out.push('[');
    out.push_str(name);

    for (key, value) in attributes {
        match value {
            AttrValue::Bool(false) => {}
            AttrValue::Bool(true) => {
                out.push(' ');
                out.push_str(key);
            }
            AttrValue::Number(n) => {
                let _ = write!(out, " {key}={n}");
            }
            AttrValue::String(s) => {
                out.push(' ');
                out.push_str(key);
                out.push('=');
                push_quoted(&mut out, s);
            }
        }
    }

    // `a/]` would read back as a self-closing slash
    if out.ends_with('/') {
        out.push(' ');
    }
    out.push(']');

    if let Some(inner) = inner {
        out.push_str(inner);
        out.push_str("[/");
        out.push_str(name);
        out.push(']');
    }

    out
}

/// Quote with double quotes, or single quotes when only those keep the value intact.
///
/// A value holding both quote kinds can only have come from an unquoted token,
/// so it is written back unquoted when it has no whitespace.
fn push_quoted(out: &mut String, value: &str) {
    let has_double = value.contains('"');
    let has_single = value.contains('\'');
    let quote = match (has_double, has_single) {
        (true, false) => '\'',
        (true, true) if !value.contains(char::is_whitespace) => {
            out.push_str(value);
            return;
        }
        _ => '"',
    };
    out.push(quote);
    out.push_str(value);
    out.push(quote);
}
