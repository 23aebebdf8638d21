use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::models::period::Period;

#[derive(Parser, Debug)]
#[command(author, version, about = "Historical stock price analysis")]
pub struct Cli {
    /// Path to the config file (stock_analysis.toml). Built-in defaults when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one symbol and print its table, charts data and filtered rows
    Show {
        /// Ticker from the configured list; the configured default when omitted
        #[arg(long)]
        symbol: Option<String>,

        /// Lookback period: 1mo, 3mo, 6mo or 1y
        #[arg(long)]
        period: Option<Period>,

        /// Closing-price threshold for the filtered table
        #[arg(long)]
        threshold: Option<f64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the configured symbols, periods and threshold range
    Symbols,

    /// Read `key=value` selection changes from stdin and re-render after each one
    Interactive {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
