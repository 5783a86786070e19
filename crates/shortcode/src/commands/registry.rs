//! `shortcode list`, `shortcode search` and `shortcode template` commands.

use clap::Args;
use serde::Serialize;
use shortcode_engine::{ShortcodeDescriptor, ShortcodeRegistry};

use super::RegistryArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Only list shortcodes in this category.
    #[arg(short = 'C', long)]
    category: Option<String>,

    /// Print entries as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    registry: RegistryArgs,
}

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Text to look for in names and descriptions.
    query: String,

    /// Print entries as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    registry: RegistryArgs,
}

/// Arguments for the template command.
#[derive(Args)]
pub(crate) struct TemplateArgs {
    /// Shortcode name.
    name: String,

    #[command(flatten)]
    registry: RegistryArgs,
}

/// Registry entry as printed by `--json`.
#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    description: &'a str,
    category: &'a str,
    icon: Option<&'a str>,
    has_content: bool,
    template: String,
}

impl<'a> Entry<'a> {
    fn new(name: &'a str, descriptor: &'a ShortcodeDescriptor) -> Self {
        Self {
            name,
            description: &descriptor.description,
            category: &descriptor.category,
            icon: descriptor.icon.as_deref(),
            has_content: descriptor.has_content,
            template: descriptor.template(name),
        }
    }
}

impl ListArgs {
    /// Execute the list command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let registry = self.registry.registry()?;
        let entries = match &self.category {
            Some(category) => registry.list_by_category(category),
            None => registry.list_all(),
        };
        print_entries(&Output::new(), &registry, &entries, self.json)
    }
}

impl SearchArgs {
    /// Execute the search command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let registry = self.registry.registry()?;
        let entries = registry.search(&self.query);
        print_entries(&Output::new(), &registry, &entries, self.json)
    }
}

impl TemplateArgs {
    /// Print the insertion template of a shortcode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let registry = self.registry.registry()?;
        let descriptor = registry
            .lookup(&self.name)
            .ok_or_else(|| CliError::Validation(format!("Unknown shortcode: {}", self.name)))?;
        Output::new().data(&descriptor.template(&self.name));
        Ok(())
    }
}

fn print_entries(
    output: &Output,
    registry: &ShortcodeRegistry,
    entries: &[(&str, &ShortcodeDescriptor)],
    json: bool,
) -> Result<(), CliError> {
    if json {
        let entries: Vec<Entry<'_>> = entries
            .iter()
            .map(|(name, descriptor)| Entry::new(name, descriptor))
            .collect();
        output.data(&serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output.warning("No matching shortcodes");
        return Ok(());
    }

    for category in registry.categories() {
        let in_category: Vec<_> = entries
            .iter()
            .filter(|(_, descriptor)| descriptor.category == category)
            .collect();
        if in_category.is_empty() {
            continue;
        }
        output.highlight(category);
        for (name, descriptor) in in_category {
            output.data(&format_entry(name, descriptor));
        }
    }
    output.info(&format!("{} of {} shortcode(s)", entries.len(), registry.len()));
    Ok(())
}

fn format_entry(name: &str, descriptor: &ShortcodeDescriptor) -> String {
    let paired = if descriptor.has_content { " [paired]" } else { "" };
    format!("  {name:<16} {}{paired}", descriptor.description)
}
