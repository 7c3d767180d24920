//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`FormatArg`] - Output format options
//! - [`DateOrderArg`] - Date-order policy for ambiguous numeric dates
//!
//! The value enums convert into their library counterparts
//! ([`crate::format::OutputFormat`], [`crate::config::DateOrder`]).

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::{DateOrder, ParserConfig};

/// Compute participant, timing, content and sentiment statistics
/// from an exported chat transcript.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstat chat.txt
    chatstat chat.txt -o stats.json --pretty
    chatstat chat.txt -f csv -o participants.csv
    chatstat chat_eu.txt --date-order day-first --streaming")]
pub struct Args {
    /// Path to the exported transcript
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: FormatArg,

    /// How to read ambiguous dates such as 03/04/25
    #[arg(long, value_enum, default_value = "month-first")]
    pub date_order: DateOrderArg,

    /// Keep system notifications instead of dropping them
    #[arg(long)]
    pub keep_system: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Aggregate while reading instead of loading the whole transcript
    #[arg(long)]
    pub streaming: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Default `tracing` filter directive for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new()
            .with_date_order(self.date_order.into())
            .with_skip_system_messages(!self.keep_system)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum FormatArg {
    /// Full summary as a JSON object
    #[default]
    Json,

    /// Per-participant table, semicolon delimited
    Csv,
}

impl From<FormatArg> for crate::format::OutputFormat {
    fn from(format: FormatArg) -> crate::format::OutputFormat {
        match format {
            FormatArg::Json => crate::format::OutputFormat::Json,
            FormatArg::Csv => crate::format::OutputFormat::Csv,
        }
    }
}

/// Date-order policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum DateOrderArg {
    /// Month before day (1/15/24)
    #[default]
    #[value(alias = "mdy", alias = "us")]
    MonthFirst,

    /// Day before month (15/01/24)
    #[value(alias = "dmy", alias = "eu")]
    DayFirst,
}

impl From<DateOrderArg> for DateOrder {
    fn from(order: DateOrderArg) -> DateOrder {
        match order {
            DateOrderArg::MonthFirst => DateOrder::MonthFirst,
            DateOrderArg::DayFirst => DateOrder::DayFirst,
        }
    }
}
