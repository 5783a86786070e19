//! CLI command implementations.

pub(crate) mod escape;
pub(crate) mod process;
pub(crate) mod registry;
pub(crate) mod scan;
pub(crate) mod validate;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use shortcode_config::{CliSettings, Config};
use shortcode_engine::ShortcodeRegistry;

use crate::error::CliError;

pub(crate) use escape::EscapeArgs;
pub(crate) use process::ProcessArgs;
pub(crate) use registry::{ListArgs, SearchArgs, TemplateArgs};
pub(crate) use scan::ScanArgs;
pub(crate) use validate::ValidateArgs;

/// Options for commands that need a shortcode registry.
#[derive(Args)]
pub(crate) struct RegistryArgs {
    /// Path to configuration file (default: auto-discover shortcodes.toml).
    #[arg(short, long, env = "SHORTCODE_CONFIG")]
    config: Option<PathBuf>,

    /// Do not register the built-in shortcodes.
    #[arg(long)]
    no_builtins: bool,
}

impl RegistryArgs {
    /// Load configuration with these options and an optional validation override.
    pub(crate) fn load(&self, validate: Option<bool>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            builtins: self.no_builtins.then_some(false),
            validate,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load configuration and build the registry.
    pub(crate) fn registry(&self) -> Result<ShortcodeRegistry, CliError> {
        Ok(self.load(None)?.registry())
    }
}

/// Read a document from `path`, or from stdin when absent or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
