//! CLI argument definitions for the study browser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use study_cli::logging::LogFormat;
use study_model::{FilterSpec, SortKey};

#[derive(Parser)]
#[command(
    name = "study-browser",
    version,
    about = "Browse, filter and export collections of research-study records",
    long_about = "Browse collections of research-study records.\n\n\
                  Reads JSON Lines or JSON array files, infers a schema, and applies a \
                  persisted view (filters, search, sort, grouping) before printing or \
                  exporting the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v info, -vv debug, -vvv trace, -q errors only).
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

    /// Allow record values (titles) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory holding the persisted view state.
    #[arg(
        long = "state-dir",
        value_name = "DIR",
        env = "STUDY_BROWSER_STATE_DIR",
        global = true
    )]
    pub state_dir: Option<PathBuf>,

    /// Keep the view state in memory only; nothing is read or written.
    #[arg(long = "no-persist", global = true)]
    pub no_persist: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show record counts, the inferred schema and group-by candidates.
    Summary(SourceArgs),

    /// Print the presentation payload as JSON.
    Payload(PayloadArgs),

    /// Apply view changes and print the resulting rows.
    Query(QueryArgs),

    /// Export the current view's rows.
    Export(ExportArgs),

    /// Show the details of one row of the current view.
    Inspect(InspectArgs),

    /// Manage the persisted view state.
    #[command(subcommand)]
    View(ViewCommand),
}

#[derive(Args)]
pub struct SourceArgs {
    /// JSON Lines or JSON array file with study records.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct PayloadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Pretty-print the JSON.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Per-field filter as FIELD=PATTERN (repeatable; an empty pattern clears it).
    #[arg(long = "filter", value_name = "FIELD=PATTERN")]
    pub filters: Vec<FilterSpec>,

    /// Global search across all listed fields.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Sort key as FIELD[:asc|desc] (repeatable; replaces the current sort).
    #[arg(long = "sort", value_name = "FIELD[:DIR]")]
    pub sort: Vec<SortKey>,

    /// Group rows by a field.
    #[arg(long = "group-by", value_name = "FIELD", conflicts_with = "no_group")]
    pub group_by: Option<String>,

    /// Remove the current grouping.
    #[arg(long = "no-group")]
    pub no_group: bool,

    /// Print at most N rows.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Export format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,

    /// Output path (default: studies_filtered.csv or studies_filtered.json).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Zero-based row position in the current view.
    #[arg(
        long = "index",
        value_name = "N",
        required_unless_present = "random",
        conflicts_with = "random"
    )]
    pub index: Option<usize>,

    /// Pick a random row of the current view.
    #[arg(long = "random")]
    pub random: bool,
}

#[derive(Subcommand)]
pub enum ViewCommand {
    /// Print the stored view state.
    Show,
    /// Forget the stored view state.
    Reset,
    /// Clear every per-field filter and the global search.
    ClearFilters,
    /// Set the row density.
    Density {
        #[arg(value_enum)]
        density: DensityArg,
    },
    /// Hide a column (Title cannot be hidden).
    Hide { field: String },
    /// Show a previously hidden column.
    Unhide { field: String },
    /// Cycle a field's sort: ascending, descending, off.
    Sort {
        field: String,
        /// Keep the other sort keys (multi-key sort).
        #[arg(long = "add")]
        add: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DensityArg {
    Compact,
    #[value(alias = "cozy")]
    Comfortable,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
