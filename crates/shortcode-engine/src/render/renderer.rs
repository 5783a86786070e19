//! Renderer capability attached to registry entries.

use crate::shortcode::Shortcode;

use super::{RenderContext, RenderOutput};

/// Produces a renderable representation of a parsed shortcode.
///
/// The scanner and validator never depend on renderers; they are only
/// consulted by [`ShortcodeProcessor`](super::ShortcodeProcessor).
///
/// # Thread Safety
///
/// Renderers are shared through the registry and may be used by several
/// processors at once, so they must be `Send + Sync` and take `&self`.
///
/// # Example
///
/// ```
/// use shortcode_engine::{RenderContext, RenderOutput, Shortcode, ShortcodeRenderer};
///
/// struct Kbd;
///
/// impl ShortcodeRenderer for Kbd {
///     fn render(&self, shortcode: &Shortcode, _ctx: &RenderContext<'_>) -> RenderOutput {
///         RenderOutput::html(format!("<kbd>{}</kbd>", shortcode.inner_text().unwrap_or_default()))
///     }
/// }
/// ```
pub trait ShortcodeRenderer: Send + Sync {
    /// Render the shortcode.
    ///
    /// Returns [`RenderOutput::Skip`] to keep the source text.
    fn render(&self, shortcode: &Shortcode, ctx: &RenderContext<'_>) -> RenderOutput;
}

impl<F> ShortcodeRenderer for F
where
    F: Fn(&Shortcode, &RenderContext<'_>) -> RenderOutput + Send + Sync,
{
    fn render(&self, shortcode: &Shortcode, ctx: &RenderContext<'_>) -> RenderOutput {
        self(shortcode, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::Attributes;
    use crate::scanner::scan_shortcodes;

    struct Upper;

    impl ShortcodeRenderer for Upper {
        fn render(&self, shortcode: &Shortcode, _ctx: &RenderContext<'_>) -> RenderOutput {
            match shortcode.inner_text() {
                Some(inner) => RenderOutput::html(inner.to_uppercase()),
                None => RenderOutput::Skip,
            }
        }
    }

    fn ctx(attributes: &Attributes) -> RenderContext<'_> {
        RenderContext {
            source_path: None,
            line: 1,
            attributes,
            fetch: None,
        }
    }

    #[test]
    fn test_struct_renderer() {
        let attributes = Attributes::new();
        let found = scan_shortcodes("[upper]hi[/upper] [upper]");

        assert_eq!(
            Upper.render(&found[0], &ctx(&attributes)),
            RenderOutput::Html("HI".to_owned())
        );
        assert_eq!(Upper.render(&found[1], &ctx(&attributes)), RenderOutput::Skip);
    }

    fn pin(sc: &Shortcode, ctx: &RenderContext<'_>) -> RenderOutput {
        RenderOutput::html(format!("{}@{}", sc.name(), ctx.line))
    }

    #[test]
    fn test_fn_renderer() {
        let attributes = Attributes::new();
        let found = scan_shortcodes("[pin]");

        assert_eq!(
            pin.render(&found[0], &ctx(&attributes)),
            RenderOutput::Html("pin@1".to_owned())
        );
    }
}
