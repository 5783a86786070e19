//! Shortcode CLI - inspect and transform bracket shortcodes.
//!
//! Provides commands for:
//! - `scan`: List shortcodes found in a document
//! - `validate`: Check shortcodes against the registry
//! - `process`: Run a document through the shortcode processor
//! - `escape` / `unescape`: Make shortcodes literal text and back
//! - `list`, `search`, `template`: Browse the shortcode registry

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    EscapeArgs, ListArgs, ProcessArgs, ScanArgs, SearchArgs, TemplateArgs, ValidateArgs,
};
use output::Output;

/// Shortcode - bracket shortcode toolkit.
#[derive(Parser)]
#[command(name = "shortcode", version, about)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List shortcodes found in a document.
    Scan(ScanArgs),
    /// Validate shortcodes against their registered schemas.
    Validate(ValidateArgs),
    /// Run a document through the processor and print the result.
    Process(ProcessArgs),
    /// Escape shortcodes so they are shown literally.
    Escape(EscapeArgs),
    /// Reverse `escape`.
    Unescape(EscapeArgs),
    /// List registered shortcodes.
    List(ListArgs),
    /// Search registered shortcodes by name and description.
    Search(SearchArgs),
    /// Print the insertion template of a shortcode.
    Template(TemplateArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Scan(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::Process(args) => args.execute(),
        Commands::Escape(args) => args.execute(false),
        Commands::Unescape(args) => args.execute(true),
        Commands::List(args) => args.execute(),
        Commands::Search(args) => args.execute(),
        Commands::Template(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
