//! `shortcode scan` command implementation.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use shortcode_engine::{LineCounter, Shortcode, scan_shortcodes};

use super::read_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the scan command.
#[derive(Args)]
pub(crate) struct ScanArgs {
    /// Input file (default: stdin).
    input: Option<PathBuf>,

    /// Print records as JSON.
    #[arg(long)]
    json: bool,
}

/// A found shortcode with its line number.
#[derive(Serialize)]
struct ScanRecord<'a> {
    line: usize,
    #[serde(flatten)]
    shortcode: &'a Shortcode,
}

impl ScanArgs {
    /// Execute the scan command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let text = read_input(self.input.as_deref())?;
        let found = scan_shortcodes(&text);
        let mut lines = LineCounter::new(&text);

        let records: Vec<ScanRecord<'_>> = found
            .iter()
            .map(|shortcode| ScanRecord {
                line: lines.line_at(shortcode.span().start),
                shortcode,
            })
            .collect();

        if self.json {
            output.data(&serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        for record in &records {
            output.data(&describe(record));
            for (key, value) in record.shortcode.attributes() {
                output.detail(&format!("    {key} = {value}"));
            }
        }
        output.info(&format!("Found {} shortcode(s)", records.len()));
        Ok(())
    }
}

fn describe(record: &ScanRecord<'_>) -> String {
    let shortcode = record.shortcode;
    let span = shortcode.span();
    let kind = if shortcode.is_self_closing() {
        "self-closing"
    } else {
        "paired"
    };
    format!(
        "{}:{}..{} [{}] {kind}",
        record.line,
        span.start,
        span.end,
        shortcode.name()
    )
}
