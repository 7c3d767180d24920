//! Summary statistics produced by the aggregation engine.
//!
//! Everything here is derived data: a [`ChatSummary`] is recomputed from a
//! transcript on every call and serializes as a plain field-name mapping.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::core::sentiment::SentimentBucket;

/// Per-sender activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub message_count: usize,
    /// Length of all bodies in Unicode scalar values
    pub character_count: usize,
    pub emoji_count: usize,
}

impl ParticipantStats {
    /// Adds one message's counts to the running totals.
    pub fn add_message(&mut self, characters: usize, emojis: usize) {
        self.message_count += 1;
        self.character_count += characters;
        self.emoji_count += emojis;
    }

    /// Mean body length in characters, or `0.0` with no messages.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_message_length(&self) -> f64 {
        if self.message_count == 0 {
            return 0.0;
        }
        self.character_count as f64 / self.message_count as f64
    }
}

/// Earliest and latest message timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSpan {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ChatSpan {
    /// A span covering a single instant.
    pub fn at(ts: NaiveDateTime) -> Self {
        Self { start: ts, end: ts }
    }

    /// Widens the span to cover `ts`.
    pub fn include(&mut self, ts: NaiveDateTime) {
        self.start = self.start.min(ts);
        self.end = self.end.max(ts);
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Message counts per sentiment bucket plus the mean polarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub too_negative: usize,
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
    pub very_positive: usize,
    /// Mean of clamped polarities; `0.0` when nothing was scored
    pub average_polarity: f64,
}

/// Bucket shares in percent of all scored messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentPercentages {
    pub too_negative: f64,
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub very_positive: f64,
}

impl SentimentDistribution {
    /// Adds one message to its bucket. Does not touch the average.
    pub fn record(&mut self, bucket: SentimentBucket) {
        *self.count_mut(bucket) += 1;
    }

    pub fn count(&self, bucket: SentimentBucket) -> usize {
        match bucket {
            SentimentBucket::TooNegative => self.too_negative,
            SentimentBucket::Negative => self.negative,
            SentimentBucket::Neutral => self.neutral,
            SentimentBucket::Positive => self.positive,
            SentimentBucket::VeryPositive => self.very_positive,
        }
    }

    fn count_mut(&mut self, bucket: SentimentBucket) -> &mut usize {
        match bucket {
            SentimentBucket::TooNegative => &mut self.too_negative,
            SentimentBucket::Negative => &mut self.negative,
            SentimentBucket::Neutral => &mut self.neutral,
            SentimentBucket::Positive => &mut self.positive,
            SentimentBucket::VeryPositive => &mut self.very_positive,
        }
    }

    /// Number of scored messages.
    pub fn total(&self) -> usize {
        self.too_negative + self.negative + self.neutral + self.positive + self.very_positive
    }

    /// Bucket with the most messages; ties go to the more negative bucket.
    pub fn dominant(&self) -> Option<SentimentBucket> {
        if self.total() == 0 {
            return None;
        }
        SentimentBucket::all()
            .iter()
            .copied()
            .rev()
            .max_by_key(|&b| self.count(b))
    }

    /// Each bucket as a percentage of [`total`](Self::total); all zero when empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn percentages(&self) -> SentimentPercentages {
        let total = self.total();
        if total == 0 {
            return SentimentPercentages::default();
        }
        let pct = |n: usize| n as f64 / total as f64 * 100.0;
        SentimentPercentages {
            too_negative: pct(self.too_negative),
            negative: pct(self.negative),
            neutral: pct(self.neutral),
            positive: pct(self.positive),
            very_positive: pct(self.very_positive),
        }
    }
}

/// Aggregate statistics for one transcript.
///
/// | Field | Description |
/// |-------|-------------|
/// | `total_messages` | Records analyzed |
/// | `participants` | Sender → counters, ordered by name |
/// | `chat_span` | Min/max timestamp, absent for an empty transcript |
/// | `daily_frequency` | Calendar date → message count |
/// | `active_days` | Distinct dates with at least one message |
/// | `average_messages_per_day` | Mean of `daily_frequency` values |
/// | `average_response_seconds` | Mean gap between consecutive records, in file order |
/// | `link_count` | Records containing at least one URL |
/// | `total_emojis` | Sum of per-participant emoji counts |
/// | `sentiment` | Bucket counts and mean polarity |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub total_messages: usize,
    pub participants: BTreeMap<String, ParticipantStats>,
    pub chat_span: Option<ChatSpan>,
    pub daily_frequency: BTreeMap<NaiveDate, usize>,
    pub active_days: usize,
    pub average_messages_per_day: f64,
    pub average_response_seconds: f64,
    pub link_count: usize,
    pub total_emojis: usize,
    pub sentiment: SentimentDistribution,
}

impl ChatSummary {
    pub fn participant(&self, sender: &str) -> Option<&ParticipantStats> {
        self.participants.get(sender)
    }

    /// Sender with the most messages; ties go to the alphabetically first name.
    pub fn most_active(&self) -> Option<(&str, &ParticipantStats)> {
        self.participants
            .iter()
            .rev()
            .max_by_key(|(_, stats)| stats.message_count)
            .map(|(name, stats)| (name.as_str(), stats))
    }

    /// Date with the most messages; ties go to the earliest date.
    pub fn busiest_day(&self) -> Option<(NaiveDate, usize)> {
        self.daily_frequency
            .iter()
            .rev()
            .max_by_key(|&(_, &count)| count)
            .map(|(&date, &count)| (date, count))
    }
}
