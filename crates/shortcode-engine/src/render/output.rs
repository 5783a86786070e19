//! Renderer output types.

/// Output from a shortcode renderer.
///
/// - [`Html`](Self::Html): markup inserted in place of the shortcode as is
/// - [`Content`](Self::Content): text that is processed again for shortcodes
/// - [`Skip`](Self::Skip): leave the shortcode source text unchanged
///
/// # Example
///
/// ```
/// use shortcode_engine::RenderOutput;
///
/// let output = RenderOutput::html("<kbd>Ctrl+C</kbd>");
/// assert!(matches!(output, RenderOutput::Html(_)));
///
/// let output = RenderOutput::content("[gallery ids=\"1,2\"]");
/// assert!(matches!(output, RenderOutput::Content(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutput {
    /// Markup that replaces the shortcode.
    Html(String),
    /// Text that replaces the shortcode and is itself scanned for shortcodes.
    ///
    /// Lets paired shortcodes render shortcodes in their inner text.
    Content(String),
    /// Don't handle this shortcode (keep the source text).
    Skip,
}

impl RenderOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }

    /// Create a content output that is processed recursively.
    #[must_use]
    pub fn content(s: impl Into<String>) -> Self {
        Self::Content(s.into())
    }
}
