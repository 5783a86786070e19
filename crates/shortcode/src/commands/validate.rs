//! `shortcode validate` command implementation.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use shortcode_engine::{
    LineCounter, ShortcodeRegistry, ValidationResult, scan_shortcodes, validate_source,
};

use super::{RegistryArgs, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the validate command.
#[derive(Args)]
pub(crate) struct ValidateArgs {
    /// Input file (default: stdin).
    input: Option<PathBuf>,

    /// Check the input as one hand-typed shortcode instead of a document.
    #[arg(long)]
    syntax: bool,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    registry: RegistryArgs,
}

/// Validation outcome of one shortcode occurrence.
#[derive(Debug, Serialize)]
struct Report {
    line: usize,
    name: String,
    #[serde(flatten)]
    result: ValidationResult,
}

impl ValidateArgs {
    /// Execute the validate command.
    ///
    /// Fails when any problem is found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let text = read_input(self.input.as_deref())?;

        if self.syntax {
            return check_syntax(&output, &text, self.json);
        }

        let registry = self.registry.registry()?;
        let reports = validate_document(&registry, &text);

        if self.json {
            output.data(&serde_json::to_string_pretty(&reports)?);
        } else {
            for report in reports.iter().filter(|r| !r.result.is_valid) {
                for error in &report.result.errors {
                    output.data(&format!("line {}: [{}] {error}", report.line, report.name));
                }
            }
        }

        let problems: usize = reports.iter().map(|r| r.result.errors.len()).sum();
        if problems > 0 {
            return Err(CliError::Validation(format!(
                "{problems} problem(s) found in {} shortcode(s)",
                reports.len()
            )));
        }

        output.success(&format!("All {} shortcode(s) valid", reports.len()));
        Ok(())
    }
}

fn check_syntax(output: &Output, text: &str, json: bool) -> Result<(), CliError> {
    let result = validate_source(text);

    if json {
        output.data(&serde_json::to_string_pretty(&result)?);
    } else {
        for error in &result.errors {
            output.data(error);
        }
    }

    if !result.is_valid {
        return Err(CliError::Validation("invalid shortcode syntax".to_owned()));
    }
    output.success("Shortcode syntax is valid");
    Ok(())
}

fn validate_document(registry: &ShortcodeRegistry, text: &str) -> Vec<Report> {
    let mut lines = LineCounter::new(text);
    scan_shortcodes(text)
        .iter()
        .map(|shortcode| Report {
            line: lines.line_at(shortcode.span().start),
            name: shortcode.name().to_owned(),
            result: registry.validate(shortcode),
        })
        .collect()
}
