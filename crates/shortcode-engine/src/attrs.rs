//! Shortcode attribute parsing.
//!
//! Parses the attribute list of an opening tag: `key="value" key='value' key=value flag`.

use std::fmt;

use indexmap::IndexMap;

/// Attribute map of a shortcode, in first-insertion order.
///
/// Keys are lowercased. A repeated key keeps its original position and takes
/// the later value.
pub type Attributes = IndexMap<String, AttrValue>;

/// A coerced attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum AttrValue {
    /// `true`/`false` literal (any case) or a bare flag.
    Bool(bool),
    /// Fully numeric literal, integer or float, optionally signed.
    Number(f64),
    /// Anything else, including the empty string.
    String(String),
}

impl AttrValue {
    /// Coerce raw attribute text to a typed value.
    ///
    /// Coercion looks at content only, so a quoted `"false"` becomes
    /// `Bool(false)` just like an unquoted one.
    ///
    /// # Example
    ///
    /// ```
    /// use shortcode_engine::AttrValue;
    ///
    /// assert_eq!(AttrValue::from_raw("TRUE"), AttrValue::Bool(true));
    /// assert_eq!(AttrValue::from_raw("-1.5"), AttrValue::Number(-1.5));
    /// assert_eq!(AttrValue::from_raw("42abc"), AttrValue::String("42abc".to_owned()));
    /// assert_eq!(AttrValue::from_raw(""), AttrValue::String(String::new()));
    /// ```
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        if is_numeric_literal(raw)
            && let Ok(number) = raw.parse::<f64>()
            && number.is_finite()
        {
            return Self::Number(number);
        }
        Self::String(raw.to_owned())
    }

    /// Runtime type of the value.
    #[must_use]
    pub fn attr_type(&self) -> AttrType {
        match self {
            Self::Bool(_) => AttrType::Boolean,
            Self::Number(_) => AttrType::Number,
            Self::String(_) => AttrType::String,
        }
    }

    /// String content, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// String form used for comparisons against allowed values and for output.
impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AttrValue {
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            // Integral numbers are written without a fractional part.
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

/// Declared type of an attribute in a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum AttrType {
    #[cfg_attr(feature = "serde", serde(alias = "text"))]
    String,
    Number,
    #[cfg_attr(feature = "serde", serde(alias = "bool"))]
    Boolean,
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        })
    }
}

/// Parse the attribute list of an opening tag.
///
/// Tokens are tried in order as `key="value"` / `key='value'`, `key=value`
/// (up to whitespace or `]`), and bare `key` (boolean `true`). Keys are
/// lowercased; later duplicates overwrite earlier ones. Unparseable
/// characters are skipped.
///
/// # Example
///
/// ```
/// use shortcode_engine::{AttrValue, parse_attributes};
///
/// let attrs = parse_attributes(r#"ID="5" size=medium Lazy"#);
/// assert_eq!(attrs.get("id"), Some(&AttrValue::Number(5.0)));
/// assert_eq!(attrs.get("size"), Some(&AttrValue::from("medium")));
/// assert_eq!(attrs.get("lazy"), Some(&AttrValue::Bool(true)));
/// ```
#[must_use]
pub fn parse_attributes(raw: &str) -> Attributes {
    let mut attrs = Attributes::new();
    let mut remaining = raw.trim();

    while !remaining.is_empty() {
        remaining = remaining.trim_start();
        if remaining.is_empty() {
            break;
        }

        // Stray quoted run without a key: skip it whole
        if let Some(quote) = remaining.chars().next().filter(|c| is_quote(*c)) {
            let (_, rest) = take_quoted(&remaining[1..], quote);
            remaining = rest;
            continue;
        }

        let key_end = remaining
            .find(|c: char| c.is_whitespace() || c == '=' || c == ']' || is_quote(c))
            .unwrap_or(remaining.len());

        if key_end == 0 {
            // Skip unrecognized character
            remaining = &remaining[next_char_len(remaining)..];
            continue;
        }

        let key = remaining[..key_end].to_lowercase();
        let after_key = &remaining[key_end..];

        if let Some(after_eq) = after_key.trim_start().strip_prefix('=') {
            let (value, rest) = parse_value(after_eq.trim_start());
            attrs.insert(key, AttrValue::from_raw(value));
            remaining = rest;
        } else {
            attrs.insert(key, AttrValue::Bool(true));
            remaining = after_key;
        }
    }

    attrs
}

/// Parse one value after `=`, returning `(value, rest)`.
fn parse_value(s: &str) -> (&str, &str) {
    match s.chars().next() {
        Some(quote) if is_quote(quote) => take_quoted(&s[1..], quote),
        _ => {
            let end = s
                .find(|c: char| c.is_whitespace() || c == ']')
                .unwrap_or(s.len());
            (&s[..end], &s[end..])
        }
    }
}

/// Take text up to the closing `quote`. An unterminated value runs to the end.
fn take_quoted(s: &str, quote: char) -> (&str, &str) {
    match s.find(quote) {
        Some(end) => (&s[..end], &s[end + 1..]),
        None => (s, ""),
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn next_char_len(s: &str) -> usize {
    s.chars().next().map_or(0, char::len_utf8)
}

/// Whether `s` is a plain decimal literal: optional sign, digits, optional
/// fraction and exponent. Rejects `inf`, `NaN` and friends that `f64` accepts.
fn is_numeric_literal(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    !body.is_empty()
        && body.bytes().any(|b| b.is_ascii_digit())
        && body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
}
