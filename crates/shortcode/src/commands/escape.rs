//! `shortcode escape` and `shortcode unescape` commands.

use std::path::PathBuf;

use clap::Args;
use shortcode_engine::{escape, unescape};

use super::read_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the escape and unescape commands.
#[derive(Args)]
pub(crate) struct EscapeArgs {
    /// Input file (default: stdin).
    input: Option<PathBuf>,
}

impl EscapeArgs {
    /// Write the escaped (or unescaped) input to stdout.
    pub(crate) fn execute(self, reverse: bool) -> Result<(), CliError> {
        let text = read_input(self.input.as_deref())?;
        let result = if reverse { unescape(&text) } else { escape(&text) };
        Output::new().raw(&result)?;
        Ok(())
    }
}
