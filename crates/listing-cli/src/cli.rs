//! CLI argument definitions for the listing audit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use listing_cli::pipeline::DEFAULT_ENRICH_ROWS;

#[derive(Parser)]
#[command(
    name = "listing-audit",
    version,
    about = "Listing audit - validate property listing exports",
    long_about = "Validate a property listing CSV export against the built-in rule catalog.\n\n\
                  Produces a multi-sheet xlsx report: a linked table of contents, the\n\
                  original data, and one sheet per rule. Each listing is claimed by the\n\
                  first rule that matches it, so no url appears on two rule sheets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a CSV export and write the xlsx report.
    Process(ProcessArgs),

    /// List the validation rule catalog.
    Rules,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Path to the listing CSV export.
    #[arg(long = "input", value_name = "CSV")]
    pub input: PathBuf,

    /// Report path (default: processed/validated_data_<today>.xlsx).
    #[arg(long = "output", value_name = "XLSX")]
    pub output: Option<PathBuf>,

    /// Request LLM commentary for flagged rows.
    ///
    /// Needs LISTING_AUDIT_API_KEY; LISTING_AUDIT_API_URL and
    /// LISTING_AUDIT_MODEL override the endpoint and model. Commentary is
    /// printed with the summary and never written into the report.
    #[arg(long = "enrich")]
    pub enrich: bool,

    /// Maximum flagged rows per rule to send for commentary.
    #[arg(long = "enrich-rows", value_name = "N", default_value_t = DEFAULT_ENRICH_ROWS)]
    pub enrich_rows: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
