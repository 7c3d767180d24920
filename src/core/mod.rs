//! Aggregation engine and its collaborators.
//!
//! This module contains:
//! - [`aggregate`] - [`Analyzer`] and the single-pass [`Accumulator`]
//! - [`models`] - [`ChatSummary`] and the per-participant/sentiment types
//! - [`sentiment`] - [`SentimentScorer`] trait, [`LexiconScorer`], polarity buckets
//! - [`emoji`] - [`EmojiCatalog`] trait and the Unicode range table
//! - [`output`] - JSON and CSV writers for a summary
//!
//! # Quick Start
//!
//! ```rust
//! use chatstat::core::{Analyzer, ChatSummary};
//! use chatstat::parser::TranscriptParser;
//!
//! let transcript = TranscriptParser::new().parse_str("1/2/23, 9:00 AM - Alice: great!")?;
//! let summary: ChatSummary = Analyzer::new().analyze(transcript.messages());
//! assert_eq!(summary.sentiment.very_positive, 1);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

pub mod aggregate;
pub mod emoji;
pub mod models;
pub mod output;
pub mod sentiment;

pub use aggregate::{Accumulator, Analyzer, contains_link};
pub use emoji::{EmojiCatalog, UnicodeEmojiCatalog};
pub use models::{
    ChatSpan, ChatSummary, ParticipantStats, SentimentDistribution, SentimentPercentages,
};
pub use sentiment::{LexiconScorer, SentimentBucket, SentimentScorer};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
