//! CLI argument definitions for hg-scan.

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use hg_cli_common::LogLevel;
use std::path::PathBuf;

/// Hourly slot discovery for HDFS-landed data.
///
/// Lists the hour directories of each topic's configured roots, counts the
/// events encoded in landed file names, and prints one JSON object per hour
/// that holds data. Hours without events are omitted.
///
/// ## Examples
///
/// Scan one day of a topic:
///   hg-scan -n nn1,nn2 -s sources.yaml -t clicks \
///       --start 2021-01-02 --end 2021-01-02T23
///
/// Scan the last six hours of two topics:
///   hg-scan -n nn1 -s sources.yaml -t clicks -t views --start -6h --end -0h
#[derive(Parser, Debug)]
#[command(name = "hg-scan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === WebHDFS Configuration ===
    /// Candidate namenodes, tried in order (host, host:port, or URL)
    #[arg(short, long = "namenode", env = "HG_NAMENODES", value_delimiter = ',', required = true)]
    pub namenodes: Vec<String>,

    /// WebHDFS port for namenodes given without one
    #[arg(long, default_value = "50070")]
    pub port: u16,

    /// User passed as `user.name` on WebHDFS requests
    #[arg(long, env = "HADOOP_USER_NAME")]
    pub user: Option<String>,

    /// WebHDFS request timeout in seconds (must be >= 1)
    #[arg(long, default_value = "30", value_parser = parse_positive_u64)]
    pub timeout_secs: u64,

    /// Use HTTPS for namenodes given as bare host names
    #[arg(long)]
    pub https: bool,

    // === Scan Options ===
    /// Sources document (YAML or JSON) mapping topics to their roots
    #[arg(short, long, env = "HG_SOURCES")]
    pub sources: PathBuf,

    /// Topic to scan (can be specified multiple times)
    #[arg(short, long = "topic", required = true)]
    pub topics: Vec<String>,

    /// First hour to scan (RFC 3339, YYYY-MM-DDTHH, YYYY-MM-DD, or -6h/-2d/-1w)
    #[arg(long, value_parser = parse_timestamp, allow_hyphen_values = true)]
    pub start: DateTime<Utc>,

    /// Last hour to scan, inclusive (same formats as --start)
    #[arg(long, value_parser = parse_timestamp, allow_hyphen_values = true)]
    pub end: DateTime<Utc>,

    /// Glob selecting landed files within an hour directory
    #[arg(long, default_value = "*.gz")]
    pub file_pattern: String,

    // === Output Options ===
    /// Output format for discovered slots
    #[arg(long, value_enum, default_value = "jsonl")]
    pub output_format: OutputFormatArg,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Output format argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    /// JSON Lines (one JSON object per line)
    Jsonl,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputFormatArg> for hg_scanner::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Jsonl => hg_scanner::OutputFormat::Jsonl,
            OutputFormatArg::Json => hg_scanner::OutputFormat::Json,
        }
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    hg_types::parse_timestamp(s)
}

/// Parse a positive u64 (>= 1).
fn parse_positive_u64(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}
