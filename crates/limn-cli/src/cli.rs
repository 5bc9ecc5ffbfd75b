//! CLI argument definitions for limnify.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use limn_ingest::{ColumnSelector, parse_delimiter};

#[derive(Parser)]
#[command(
    name = "limnify",
    version,
    about = "Turn a delimited timeseries file into a Limn datasource",
    long_about = "Turn a delimited timeseries file into a Limn datasource.\n\n\
                  Writes datafiles/{id}.csv and datasources/{id}.yaml under --basedir,\n\
                  optionally pivoting long (date, metric, value) rows into one column\n\
                  per metric and writing a graph of every column."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: LimnifyArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct LimnifyArgs {
    /// Delimited input file; reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Field delimiter (a single character, or `\t`).
    #[arg(long = "delim", default_value = "\\t", value_parser = parse_delim)]
    pub delim: u8,

    /// Column names to use when the input has no header row.
    ///
    /// When given, the first line of the input is treated as data. The names
    /// are shown in the Limn graph editor.
    #[arg(long = "header", value_name = "NAME", num_args = 1..)]
    pub header: Option<Vec<String>>,

    /// Date column, by name or zero-based index.
    #[arg(long = "datecol", default_value = "0")]
    pub datecol: ColumnSelector,

    /// strftime format of the date column. Without it common layouts are
    /// tried in turn.
    #[arg(long = "datefmt", value_name = "FORMAT")]
    pub datefmt: Option<String>,

    /// Pivot long rows into one column per metric, summing values.
    #[arg(long = "pivot")]
    pub pivot: bool,

    /// Column holding metric names when pivoting.
    #[arg(long = "metriccol", default_value = "1")]
    pub metriccol: ColumnSelector,

    /// Column holding the values to sum when pivoting.
    #[arg(long = "valcol", default_value = "2")]
    pub valcol: ColumnSelector,

    /// Directory that receives datafiles/, datasources/ and graphs/.
    #[arg(long = "basedir", value_name = "DIR", default_value = ".")]
    pub basedir: PathBuf,

    /// Datasource id (defaults to the input file stem).
    #[arg(long = "id")]
    pub id: Option<String>,

    /// Display name; words are joined with spaces (defaults to the file stem).
    #[arg(long = "name", value_name = "WORD", num_args = 1..)]
    pub name: Option<Vec<String>>,

    /// Also write a graph of every non-date column.
    #[arg(long = "write-graph", alias = "write_graph")]
    pub write_graph: bool,
}

fn parse_delim(value: &str) -> Result<u8, String> {
    parse_delimiter(value).map_err(|e| e.to_string())
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
