//! Small string helpers.

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// 1-indexed line number of a byte offset.
///
/// Offsets past the end count as the last line. Use [`LineCounter`] when
/// numbering many offsets of the same text.
#[must_use]
pub fn line_at(text: &str, offset: usize) -> usize {
    LineCounter::new(text).line_at(offset)
}

/// Line numbers for a sequence of byte offsets into one text.
///
/// Only the bytes since the previous offset are counted, so walking a
/// document front to back is linear. A smaller offset restarts the count.
///
/// # Example
///
/// ```
/// use shortcode_engine::LineCounter;
///
/// let mut lines = LineCounter::new("a\nb\nc");
/// assert_eq!(lines.line_at(2), 2);
/// assert_eq!(lines.line_at(4), 3);
/// assert_eq!(lines.line_at(0), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LineCounter<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
        }
    }

    /// 1-indexed line number of `offset`.
    pub fn line_at(&mut self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        if offset < self.offset {
            self.offset = 0;
            self.line = 1;
        }
        self.line += self.text.as_bytes()[self.offset..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.offset = offset;
        self.line
    }
}
