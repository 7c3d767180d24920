//! Single-pass aggregation of message records into a [`ChatSummary`].
//!
//! [`Analyzer`] owns the two pluggable collaborators (sentiment scorer and
//! emoji catalog). [`Accumulator`] is the running state of one pass: it keeps
//! only counters, the min/max timestamp and the previous timestamp, so it
//! can fold an unbounded [`MessageStream`](crate::streaming::MessageStream).
//!
//! # Example
//!
//! ```rust
//! use chatstat::core::aggregate::Analyzer;
//! use chatstat::parser::TranscriptParser;
//!
//! let transcript = TranscriptParser::new().parse_str(
//!     "1/2/23, 9:00 AM - Alice: hello http://x.co 🙂\n1/2/23, 9:05 AM - Bob: hi",
//! )?;
//! let summary = Analyzer::new().analyze(transcript.messages());
//!
//! assert_eq!(summary.link_count, 1);
//! assert_eq!(summary.participants["Alice"].emoji_count, 1);
//! assert_eq!(summary.average_response_seconds, 300.0);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::collections::BTreeMap;
use std::io::BufRead;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::Message;
use crate::core::emoji::{EmojiCatalog, UnicodeEmojiCatalog};
use crate::core::models::{ChatSpan, ChatSummary, ParticipantStats, SentimentDistribution};
use crate::core::sentiment::{LexiconScorer, SentimentBucket, SentimentScorer};
use crate::error::{ChatstatError, Result};
use crate::parser::TranscriptParser;

/// `http://`, `https://` or `www.` at a word boundary.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)\S").expect("link regex is valid")
});

/// Returns `true` if the text contains a URL-like token.
///
/// ```rust
/// use chatstat::core::aggregate::contains_link;
///
/// assert!(contains_link("see https://example.com"));
/// assert!(contains_link("www.example.com"));
/// assert!(!contains_link("no links here, just awww.."));
/// ```
pub fn contains_link(text: &str) -> bool {
    LINK_RE.is_match(text)
}

/// Computes a [`ChatSummary`] from message records.
///
/// Generic over the sentiment scorer and emoji catalog; defaults are
/// [`LexiconScorer`] and [`UnicodeEmojiCatalog`].
#[derive(Debug, Clone, Default)]
pub struct Analyzer<S = LexiconScorer, E = UnicodeEmojiCatalog> {
    scorer: S,
    catalog: E,
}

impl Analyzer {
    /// Creates an analyzer with the built-in scorer and catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SentimentScorer, E: EmojiCatalog> Analyzer<S, E> {
    pub fn with_components(scorer: S, catalog: E) -> Self {
        Self { scorer, catalog }
    }

    /// Replaces the sentiment scorer.
    #[must_use]
    pub fn with_scorer<S2: SentimentScorer>(self, scorer: S2) -> Analyzer<S2, E> {
        Analyzer {
            scorer,
            catalog: self.catalog,
        }
    }

    /// Replaces the emoji catalog.
    #[must_use]
    pub fn with_catalog<E2: EmojiCatalog>(self, catalog: E2) -> Analyzer<S, E2> {
        Analyzer {
            scorer: self.scorer,
            catalog,
        }
    }

    /// Starts an incremental pass.
    pub fn accumulator(&self) -> Accumulator<'_, S, E> {
        Accumulator {
            analyzer: self,
            total_messages: 0,
            participants: BTreeMap::new(),
            daily_frequency: BTreeMap::new(),
            span: None,
            previous: None,
            response_seconds_sum: 0,
            link_count: 0,
            sentiment: SentimentDistribution::default(),
            polarity_sum: 0.0,
        }
    }

    /// Aggregates a slice of records. The input is not modified.
    pub fn analyze(&self, messages: &[Message]) -> ChatSummary {
        let mut acc = self.accumulator();
        for message in messages {
            acc.push(message);
        }
        acc.finish()
    }

    /// Parses and aggregates in one streaming pass, without collecting messages.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatError::Io`] on read failure, or
    /// [`ChatstatError::NoValidMessages`] if no record survives parsing.
    pub fn analyze_reader<R: BufRead>(
        &self,
        parser: &TranscriptParser,
        reader: R,
    ) -> Result<ChatSummary> {
        let mut stream = parser.stream(reader);
        let mut acc = self.accumulator();
        for message in stream.by_ref() {
            acc.push(&message?);
        }

        if acc.total_messages == 0 {
            return Err(ChatstatError::no_valid_messages(stream.stats().lines_read));
        }
        Ok(acc.finish())
    }
}

/// Running state of one aggregation pass.
#[derive(Debug)]
pub struct Accumulator<'a, S, E> {
    analyzer: &'a Analyzer<S, E>,
    total_messages: usize,
    participants: BTreeMap<String, ParticipantStats>,
    daily_frequency: BTreeMap<NaiveDate, usize>,
    span: Option<ChatSpan>,
    previous: Option<NaiveDateTime>,
    response_seconds_sum: i64,
    link_count: usize,
    sentiment: SentimentDistribution,
    polarity_sum: f64,
}

impl<S: SentimentScorer, E: EmojiCatalog> Accumulator<'_, S, E> {
    /// Folds one record into the running totals.
    pub fn push(&mut self, message: &Message) {
        let ts = message.timestamp;
        self.total_messages += 1;

        let characters = message.body.chars().count();
        let emojis = self.analyzer.catalog.count(&message.body);
        self.participants
            .entry(message.sender.clone())
            .or_default()
            .add_message(characters, emojis);

        if contains_link(&message.body) {
            self.link_count += 1;
        }

        *self.daily_frequency.entry(ts.date()).or_insert(0) += 1;

        match self.span.as_mut() {
            Some(span) => span.include(ts),
            None => self.span = Some(ChatSpan::at(ts)),
        }

        if let Some(prev) = self.previous {
            self.response_seconds_sum += (ts - prev).num_seconds();
        }
        self.previous = Some(ts);

        let polarity = self.analyzer.scorer.score(&message.body);
        let polarity = if polarity.is_nan() { 0.0 } else { polarity.clamp(-1.0, 1.0) };
        self.sentiment.record(SentimentBucket::classify(polarity));
        self.polarity_sum += polarity;
    }

    /// Number of records pushed so far.
    pub fn len(&self) -> usize {
        self.total_messages
    }

    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }

    /// Computes the final summary.
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(self) -> ChatSummary {
        let total = self.total_messages;

        let average_response_seconds = if total < 2 {
            0.0
        } else {
            self.response_seconds_sum as f64 / (total - 1) as f64
        };

        let active_days = self.daily_frequency.len();
        let average_messages_per_day = if active_days == 0 {
            0.0
        } else {
            total as f64 / active_days as f64
        };

        let mut sentiment = self.sentiment;
        sentiment.average_polarity = if total == 0 {
            0.0
        } else {
            self.polarity_sum / total as f64
        };

        let total_emojis = self.participants.values().map(|p| p.emoji_count).sum();

        tracing::debug!(
            messages = total,
            participants = self.participants.len(),
            active_days,
            "aggregation finished"
        );

        ChatSummary {
            total_messages: total,
            participants: self.participants,
            chat_span: self.span,
            daily_frequency: self.daily_frequency,
            active_days,
            average_messages_per_day,
            average_response_seconds,
            link_count: self.link_count,
            total_emojis,
            sentiment,
        }
    }
}
