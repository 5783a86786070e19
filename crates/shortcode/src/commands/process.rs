//! `shortcode process` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use shortcode_config::Config;
use shortcode_engine::ShortcodeProcessor;

use super::{RegistryArgs, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the process command.
#[derive(Args)]
pub(crate) struct ProcessArgs {
    /// Input file (default: stdin).
    input: Option<PathBuf>,

    /// Skip schema validation, so invalid shortcodes are not replaced.
    #[arg(long)]
    no_validate: bool,

    #[command(flatten)]
    registry: RegistryArgs,
}

impl ProcessArgs {
    /// Execute the process command.
    ///
    /// The processed document goes to stdout and warnings to stderr.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let text = read_input(self.input.as_deref())?;
        let config = self.registry.load(self.no_validate.then_some(false))?;

        let (document, warnings) = process_document(&config, self.input.as_deref(), &text);

        for warning in &warnings {
            output.warning(warning);
        }
        output.raw(&document)?;
        Ok(())
    }
}

fn process_document(config: &Config, source: Option<&Path>, text: &str) -> (String, Vec<String>) {
    let registry = config.registry();
    let mut processor_config = config.processor_config();
    if let Some(path) = source.filter(|p| *p != Path::new("-")) {
        processor_config = processor_config.with_source_path(path);
    }

    let mut processor = ShortcodeProcessor::with_config(&registry, processor_config);
    let document = processor.process(text);
    (document, processor.warnings().to_vec())
}
