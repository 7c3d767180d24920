//! # chatstat
//!
//! A Rust library for turning exported chat transcripts into a statistical
//! summary: who talks, how much, when, how quickly people reply, what they
//! share, and the overall tone.
//!
//! ## Overview
//!
//! Transcripts are the line-oriented text exports produced by messaging apps:
//!
//! ```text
//! 1/2/23, 9:00 AM - Alice: hello http://x.co 🙂
//! 1/2/23, 9:05 AM - Bob: hi
//! ```
//!
//! Parsing is tolerant. Headers may carry several date and time layouts,
//! a message may span several physical lines, system notifications are
//! filtered out, and invalid UTF-8 is decoded lossily. Problems with single
//! lines are reported as [`diagnostics`] and never abort the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let transcript = TranscriptParser::new().parse("chat.txt".as_ref())?;
//!     let summary = Analyzer::new().analyze(transcript.messages());
//!
//!     println!("{} messages over {} days", summary.total_messages, summary.active_days);
//!     write_json(&summary, "summary.json", true)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! For very large exports, aggregate while reading:
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use chatstat::prelude::*;
//!
//! let parser = TranscriptParser::new();
//! let reader = BufReader::new(File::open("huge_chat.txt")?);
//! let summary = Analyzer::new().analyze_reader(&parser, reader)?;
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), [`Transcript`](parser::Transcript), [`ParseStats`](parser::ParseStats)
//! - [`parsing`] - line classification and timestamp normalization
//! - [`streaming`] - [`MessageStream`](streaming::MessageStream) iterator
//! - [`diagnostics`] - per-line problem reports and sinks
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`DateOrder`](config::DateOrder)
//! - [`core`] - aggregation, sentiment, emoji detection, output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`error`] - [`ChatstatError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod streaming;

pub use error::{ChatstatError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{ChatstatError, Result};

    pub use crate::config::{DateOrder, ParserConfig};
    pub use crate::parser::{ParseStats, Transcript, TranscriptParser};
    pub use crate::streaming::MessageStream;

    pub use crate::diagnostics::{
        CountingSink, Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink,
    };

    pub use crate::core::{
        Analyzer, ChatSpan, ChatSummary, EmojiCatalog, LexiconScorer, ParticipantStats,
        SentimentBucket, SentimentDistribution, SentimentScorer, UnicodeEmojiCatalog,
    };

    #[cfg(feature = "csv-output")]
    pub use crate::core::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::{to_json, write_json};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
