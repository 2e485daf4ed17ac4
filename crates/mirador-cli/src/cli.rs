//! CLI argument definitions for the Mirador dataset builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mirador_model::DEFAULT_MISSING_TOKEN;

#[derive(Parser)]
#[command(
    name = "mirador",
    version,
    about = "Build Mirador datasets from clinical cohort tables",
    long_about = "Aggregate master, demographics, case notification, metabolic panel,\n\
                  viral load and sequencing sources into a Mirador dataset directory,\n\
                  and convert finished datasets into flat CSV or SPSS inputs."
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
    /// Aggregate the cohort sources into a Mirador dataset directory.
    Aggregate(AggregateArgs),

    /// Convert a dataset directory into a self-describing CSV file.
    Csv(CsvArgs),

    /// Convert a dataset directory into a data file plus an SPSS syntax card.
    Spss(SpssArgs),
}

#[derive(Parser)]
pub struct AggregateArgs {
    /// Directory holding the ignore list, dictionaries and source tables.
    #[arg(long = "input-dir", value_name = "DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Dataset directory to (re)create.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "mirador")]
    pub output_dir: PathBuf,

    /// Merge SNP calls, allele frequencies and cluster assignments.
    #[arg(long = "seq")]
    pub seq: bool,

    /// Log-transform viral loads (log10(1 + copies/mL)) before aggregating.
    #[arg(long = "log")]
    pub log: bool,

    /// Token written for missing values.
    #[arg(long = "missing", value_name = "TOKEN", default_value = DEFAULT_MISSING_TOKEN)]
    pub missing: String,

    /// Source layout file (default: <INPUT_DIR>/mirador.toml when present).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CsvArgs {
    /// Dataset directory to convert.
    #[arg(long = "in", value_name = "DIR", default_value = "mirador")]
    pub input: PathBuf,

    /// Output CSV file; a `<stem>-dictionary.csv` is written beside it.
    #[arg(long = "out", value_name = "FILE", default_value = "data.csv")]
    pub output: PathBuf,

    /// Token written for missing values.
    #[arg(long = "miss", value_name = "TOKEN", default_value = "")]
    pub missing: String,
}

#[derive(Parser)]
pub struct SpssArgs {
    /// Dataset directory to convert.
    #[arg(long = "in", value_name = "DIR", default_value = "mirador")]
    pub input: PathBuf,

    /// Output data file; the syntax card is written as `<stem>.spss`.
    #[arg(long = "out", value_name = "FILE", default_value = "data.csv")]
    pub output: PathBuf,
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
