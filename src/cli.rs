use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Profile and aggregate CSV datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Infer the numeric/categorical column partition of a CSV file
    Probe(ProbeArgs),
    /// Preview the first few raw rows in a formatted table
    Preview(PreviewArgs),
    /// Produce summary statistics for numeric columns
    Stats(StatsArgs),
    /// Group rows by a categorical column and reduce a numeric column
    Aggregate(AggregateArgs),
    /// Count category frequencies with their share of total rows
    Distribution(DistributionArgs),
    /// Synthesize dataset findings (completeness, summaries, tip)
    Insights(InsightsArgs),
    /// Emit the plain-text grounding block for a chat assistant
    Context(ContextArgs),
    /// Rank rows by a numeric column and keep the top N
    Top(TopArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum Reduction {
    Sum,
    Average,
    Count,
    Min,
    Max,
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Input CSV file to inspect ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum data rows to ingest (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Emit the column profiles as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input CSV file to preview ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Input CSV file to profile ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Columns to include (defaults to every numeric column)
    #[arg(short = 'C', long = "columns", action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum data rows to ingest (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Emit the statistics as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct AggregateArgs {
    /// Input CSV file to aggregate ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Categorical column to group rows by
    #[arg(short = 'g', long = "group-by")]
    pub group_by: String,
    /// Numeric column to reduce within each group
    #[arg(short = 'v', long = "value")]
    pub value: String,
    /// Reduction applied per group
    #[arg(short = 'r', long = "reduce", value_enum, default_value = "sum")]
    pub reduce: Reduction,
    /// Keep only the N largest groups (0 = all)
    #[arg(long, default_value_t = 0)]
    pub top: usize,
    /// Truncate display keys to this many characters (0 = no truncation)
    #[arg(long = "key-width", default_value_t = 0)]
    pub key_width: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum data rows to ingest (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Emit the groups as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DistributionArgs {
    /// Input CSV file to analyze ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Categorical column to count frequencies for
    #[arg(short = 'g', long = "group-by")]
    pub group_by: String,
    /// Keep only the N most frequent groups (0 = all)
    #[arg(long, default_value_t = 0)]
    pub top: usize,
    /// Truncate display keys to this many characters (0 = no truncation)
    #[arg(long = "key-width", default_value_t = 0)]
    pub key_width: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum data rows to ingest (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Emit the groups as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct InsightsArgs {
    /// Input CSV file to summarize ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum data rows to ingest (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    /// Emit the insights as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ContextArgs {
    /// Input CSV file to describe ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows embedded in the sample preview
    #[arg(long = "preview-rows", default_value_t = 5)]
    pub preview_rows: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum data rows to ingest (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct TopArgs {
    /// Input CSV file to rank ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Numeric column to rank by (defaults to the first numeric column)
    #[arg(long = "by")]
    pub by: Option<String>,
    /// Number of rows to keep
    #[arg(long, default_value_t = 8)]
    pub rows: usize,
    /// Write the ranked rows as CSV to this file instead of a table
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Maximum data rows to ingest (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
