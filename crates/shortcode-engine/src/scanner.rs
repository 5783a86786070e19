//! Shortcode scanning.
//!
//! Finds `[name attrs]`, `[name attrs/]` and `[name attrs]inner[/name]` in free text.
//!
//! Scanning is a single left-to-right pass. Inner text of a paired shortcode is
//! captured raw: shortcodes inside it are not recognized separately, and the
//! first matching closing tag ends the pair, so same-named shortcodes do not nest.

use std::sync::LazyLock;

use regex::{Captures, Match, Regex};

use crate::attrs::parse_attributes;
use crate::shortcode::{Shortcode, Span};

/// Opening tag: `[`, name, optional whitespace-led attribute list, optional `/`, `]`.
static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z0-9_-]+)((?:\s[^\[\]]*?)?)(/?)\]").expect("invalid open tag regex")
});

/// Lazy iterator over the shortcodes of a text, in order of their start offset.
///
/// # Example
///
/// ```
/// use shortcode_engine::Scanner;
///
/// let names: Vec<_> = Scanner::new("a [one/] b [two] c")
///     .map(|sc| sc.name().to_owned())
///     .collect();
/// assert_eq!(names, vec!["one", "two"]);
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Shortcode;

    fn next(&mut self) -> Option<Shortcode> {
        if self.pos >= self.text.len() {
            return None;
        }

        let caps = OPEN_TAG.captures_at(self.text, self.pos)?;
        let open = caps.get(0)?;
        let (shortcode, end) = build_shortcode(self.text, open, &caps);
        self.pos = end;
        Some(shortcode)
    }
}

/// Scan `text` for all top-level shortcodes.
///
/// Malformed bracket syntax is left alone and simply produces no record.
///
/// # Example
///
/// ```
/// use shortcode_engine::scan_shortcodes;
///
/// let found = scan_shortcodes("[quote]Hello[/quote] and [image id=\"1\"]");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].inner_text(), Some("Hello"));
/// assert!(found[1].is_self_closing());
/// ```
#[must_use]
pub fn scan_shortcodes(text: &str) -> Vec<Shortcode> {
    Scanner::new(text).collect()
}

/// Check if a name is a valid shortcode name.
///
/// Valid names are non-empty and contain only ASCII letters, digits, hyphens,
/// and underscores.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Build a record from an opening-tag match, pairing it with a closing tag
/// when one follows. Returns the record and the end offset of the match.
fn build_shortcode(text: &str, open: Match<'_>, caps: &Captures<'_>) -> (Shortcode, usize) {
    let raw_name = &caps[1];
    let explicit_close = !caps[3].is_empty();

    let start = open.start();
    let mut end = open.end();
    let mut inner_text = None;

    if !explicit_close {
        let rest = &text[end..];
        if let Some((inner_end, close_len)) = find_pair_end(rest, raw_name) {
            inner_text = Some(rest[..inner_end].to_owned());
            end += inner_end + close_len;
        }
    }

    let shortcode = Shortcode::new(
        raw_name.to_ascii_lowercase(),
        parse_attributes(&caps[2]),
        inner_text,
        text[start..end].to_owned(),
        Span::new(start, end),
    );

    (shortcode, end)
}

/// Locate the closing tag for `name` in the text following its opening tag.
///
/// The first `[/name]` wins. If another opening tag of the same name comes
/// first, the opener is treated as self-closing. Returns the offset of the
/// closing tag in `rest` and its length.
fn find_pair_end(rest: &str, name: &str) -> Option<(usize, usize)> {
    let close_at = find_closing_tag(rest, name)?;

    let reopened = OPEN_TAG
        .captures_iter(&rest[..close_at])
        .any(|c| c[1].eq_ignore_ascii_case(name));
    if reopened {
        return None;
    }

    Some((close_at, name.len() + 3))
}

/// Find `[/name]` (name compared case-insensitively).
fn find_closing_tag(rest: &str, name: &str) -> Option<usize> {
    rest.match_indices("[/").map(|(i, _)| i).find(|&i| {
        let name_start = i + 2;
        let name_end = name_start + name.len();
        rest.get(name_start..name_end)
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
            && rest.as_bytes().get(name_end) == Some(&b']')
    })
}
