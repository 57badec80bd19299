//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - Output format options
//!
//! [`OutputFormat`] is usable outside of CLI context:
//!
//! ```rust
//! use convopack::cli::OutputFormat;
//!
//! let format = OutputFormat::Jsonl;
//! assert_eq!(format.extension(), "jsonl");
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Turn a Facebook Messenger data download into (context, response)
/// training pairs for seq2seq models.
#[derive(Parser, Debug, Clone)]
#[command(name = "convopack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    convopack facebook-export
    convopack facebook-export -o pairs.csv -f csv
    convopack facebook-export --max-context-len 4 --filter-hyperlinks
    convopack facebook-export --max-participants 2 --no-tags")]
pub struct Args {
    /// Path to the Messenger export (download root or inbox directory)
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = "training_pairs.json")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Maximum number of ancestor turns per context (unbounded if unset)
    #[arg(long, value_name = "N")]
    pub max_context_len: Option<usize>,

    /// Exclude messages with N characters or more (unbounded if unset)
    #[arg(long, value_name = "N")]
    pub max_message_len: Option<usize>,

    /// Exclude messages containing www/http
    #[arg(long)]
    pub filter_hyperlinks: bool,

    /// Keep contexts as turn lists instead of joining into one string
    #[arg(long)]
    pub no_combine: bool,

    /// Disable <sos>/<eos> boundary markers
    #[arg(long)]
    pub no_tags: bool,

    /// Skip conversations with more than N participants
    #[arg(long, value_name = "N")]
    pub max_participants: Option<usize>,

    /// Keep only conversations with strictly more than N messages
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub min_messages: usize,

    /// Disable Meta mojibake encoding repair
    #[arg(long)]
    pub no_fix_encoding: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format options.
///
/// - [`Json`](OutputFormat::Json) - Parallel `contexts`/`responses` arrays
/// - [`Jsonl`](OutputFormat::Jsonl) - One example per line, ideal for ML pipelines
/// - [`Csv`](OutputFormat::Csv) - Semicolon-delimited `context;response` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON object with parallel contexts/responses arrays (default)
    #[default]
    Json,

    /// JSON Lines - one example object per line
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "csv"]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}
