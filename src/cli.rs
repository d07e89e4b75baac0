//! CLI argument parsing for the chainlog trace reconstructor

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for reconstructed logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "chainlog")]
#[command(version)]
#[command(about = "Rebuild correlated error traces from chainlog JSON lines", long_about = None)]
pub struct Cli {
    /// Log files to read (stdin when none are given)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Only keep records stamped strictly after this UTC time
    /// (e.g. "2025-06-25 00:00:00.000000")
    #[arg(short = 'a', long = "after", value_name = "TIMESTAMP")]
    pub after: Option<String>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Include structured args in text output
    #[arg(long = "args")]
    pub show_args: bool,

    /// Only print traces, not standalone entries
    #[arg(short = 't', long = "traces-only")]
    pub traces_only: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
