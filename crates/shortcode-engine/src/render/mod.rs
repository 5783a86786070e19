//! Live rendering of shortcodes through registry renderers.
//!
//! [`ShortcodeProcessor`] scans a document once, looks each shortcode up in a
//! [`ShortcodeRegistry`](crate::ShortcodeRegistry), validates it against the
//! registered schema, and swaps its span for the renderer's output. Unknown
//! names become placeholders so the editor can offer edit/delete affordances.

mod context;
mod output;
mod processor;
mod renderer;

pub use context::{FetchFn, RenderContext};
pub use output::RenderOutput;
pub use processor::{ProcessorConfig, ShortcodeProcessor, UnknownPolicy};
pub use renderer::ShortcodeRenderer;
