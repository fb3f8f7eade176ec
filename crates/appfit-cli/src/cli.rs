//! CLI argument definitions for the portfolio assessment tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "appfit",
    version,
    about = "Architecture-fitness assessment of bank application portfolios",
    long_about = "Reconcile application inventories from two banks against \
                  due-diligence input lists, evaluate the fixed fitness \
                  criteria per application, and produce slide rows, a pending \
                  list and a compliance workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Reconcile input lists against the inventories and write all outputs.
    Report(ReportArgs),

    /// Stage the master inventories into the SQLite store.
    Load(LoadArgs),

    /// Search the store for substring suggestions for pending applications.
    Suggest(SuggestArgs),

    /// List the evaluated criteria and their rules.
    Criteria,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Directory containing the <domain>/<subdomain>.txt input lists.
    #[arg(long = "inputs", value_name = "DIR")]
    pub inputs: PathBuf,

    /// Buyer bank inventory (.csv, .xlsx, .xls or .ods).
    #[arg(
        long = "buyer",
        value_name = "FILE",
        requires = "bought",
        conflicts_with = "store"
    )]
    pub buyer: Option<PathBuf>,

    /// Bought bank inventory (.csv, .xlsx, .xls or .ods).
    #[arg(
        long = "bought",
        value_name = "FILE",
        requires = "buyer",
        conflicts_with = "store"
    )]
    pub bought: Option<PathBuf>,

    /// Read inventories from a staged SQLite store instead of files.
    ///
    /// Store-backed runs additionally mark every matched application as
    /// included in the target architecture.
    #[arg(long = "store", value_name = "DB", required_unless_present = "buyer")]
    pub store: Option<PathBuf>,

    /// Output directory for slides, pending list and workbook.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "outputs")]
    pub output_dir: PathBuf,

    /// Which historical rule set interprets the criteria columns.
    #[arg(long = "rules", value_enum, default_value = "bank-keyed")]
    pub rules: RulesArg,

    /// Fuzzy-match acceptance threshold (0-100).
    #[arg(long = "threshold", value_name = "SCORE", default_value_t = 90.0)]
    pub threshold: f64,

    /// TOML file overriding the built-in criteria-to-column mapping.
    #[arg(long = "criteria-map", value_name = "TOML")]
    pub criteria_map: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LoadArgs {
    /// Buyer bank inventory (.csv, .xlsx, .xls or .ods).
    #[arg(long = "buyer", value_name = "FILE")]
    pub buyer: PathBuf,

    /// Bought bank inventory (.csv, .xlsx, .xls or .ods).
    #[arg(long = "bought", value_name = "FILE")]
    pub bought: PathBuf,

    /// SQLite store to create or replace tables in.
    #[arg(long = "store", value_name = "DB")]
    pub store: PathBuf,
}

#[derive(Parser)]
pub struct SuggestArgs {
    /// Staged SQLite store to search.
    #[arg(long = "store", value_name = "DB")]
    pub store: PathBuf,

    /// Pending list produced by the report command.
    #[arg(
        long = "pending",
        value_name = "FILE",
        default_value = "outputs/pendientes/pendientes.txt"
    )]
    pub pending: PathBuf,

    /// Where to write the suggestion report.
    #[arg(
        long = "output",
        value_name = "FILE",
        default_value = "outputs/pendientes/sugerencias_pendientes.txt"
    )]
    pub output: PathBuf,

    /// Maximum suggestions per pending application.
    #[arg(long = "limit", value_name = "N", default_value_t = 10)]
    pub limit: usize,
}

/// CLI rule-set choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum RulesArg {
    /// Raw inventory wording, keyed by source bank.
    BankKeyed,
    /// Pre-scored "Cumple"/"Parcialmente" cell text.
    Prescored,
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
