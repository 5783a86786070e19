//! Escaping of literal shortcode text.
//!
//! `escape` turns every `[name` into `&#91;name` so the text is no longer
//! recognized by the scanner; `unescape` reverses it. Text that already holds
//! an escaped opener (`&#91;name`, `&amp;#91;name`, ...) gets one more `amp;`
//! level on escape and loses one on unescape, which keeps the pair exact
//! inverses for every input.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A raw opener `[x`, or an already-escaped opener `&(amp;)*#91;x`.
static ESCAPABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\[|&(?:amp;)*#91;)([A-Za-z0-9_-])").expect("invalid escape regex")
});

/// An escaped opener, with the number of extra `amp;` levels captured.
static ESCAPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&((?:amp;)*)#91;([A-Za-z0-9_-])").expect("invalid unescape regex")
});

/// Escape shortcode openers so the text renders literally.
///
/// # Example
///
/// ```
/// use shortcode_engine::{escape, scan_shortcodes, unescape};
///
/// let escaped = escape("Type [gallery] to add images");
/// assert_eq!(escaped, "Type &#91;gallery] to add images");
/// assert!(scan_shortcodes(&escaped).is_empty());
/// assert_eq!(unescape(&escaped), "Type [gallery] to add images");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    ESCAPABLE
        .replace_all(text, |caps: &Captures<'_>| {
            let opener = &caps[1];
            let first = &caps[2];
            if opener == "[" {
                format!("&#91;{first}")
            } else {
                format!("&amp;{}{first}", &opener[1..])
            }
        })
        .into_owned()
}

/// Reverse [`escape`].
#[must_use]
pub fn unescape(text: &str) -> String {
    ESCAPED
        .replace_all(text, |caps: &Captures<'_>| {
            let levels = &caps[1];
            let first = &caps[2];
            match levels.strip_prefix("amp;") {
                None => format!("[{first}"),
                Some(fewer) => format!("&{fewer}#91;{first}"),
            }
        })
        .into_owned()
}
