//! Sentiment scoring and polarity buckets.
//!
//! Scoring is pluggable through [`SentimentScorer`]. The crate ships
//! [`LexiconScorer`], a small word-list scorer with negation and intensifier
//! handling, and any `Fn(&str) -> f64` closure works as a scorer too.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Maps a text to a polarity in `[-1, 1]`.
///
/// Implementations should be pure. Values outside the range are clamped by
/// the aggregator.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> f64;
}

impl<F: Fn(&str) -> f64> SentimentScorer for F {
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

/// One of five polarity ranges.
///
/// | Polarity | Bucket |
/// |----------|--------|
/// | `p <= -0.6` | `TooNegative` |
/// | `p <= -0.2` | `Negative` |
/// | `p <= 0.2` | `Neutral` |
/// | `p <= 0.6` | `Positive` |
/// | otherwise | `VeryPositive` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentBucket {
    #[serde(rename = "Too Negative")]
    TooNegative,
    Negative,
    Neutral,
    Positive,
    #[serde(rename = "Very Positive")]
    VeryPositive,
}

impl SentimentBucket {
    /// Classifies a polarity using inclusive upper thresholds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstat::core::sentiment::SentimentBucket;
    ///
    /// assert_eq!(SentimentBucket::classify(-0.2), SentimentBucket::Negative);
    /// assert_eq!(SentimentBucket::classify(0.2), SentimentBucket::Neutral);
    /// assert_eq!(SentimentBucket::classify(0.61), SentimentBucket::VeryPositive);
    /// ```
    pub fn classify(polarity: f64) -> Self {
        if polarity <= -0.6 {
            SentimentBucket::TooNegative
        } else if polarity <= -0.2 {
            SentimentBucket::Negative
        } else if polarity <= 0.2 {
            SentimentBucket::Neutral
        } else if polarity <= 0.6 {
            SentimentBucket::Positive
        } else {
            SentimentBucket::VeryPositive
        }
    }

    pub fn all() -> &'static [SentimentBucket] {
        &[
            SentimentBucket::TooNegative,
            SentimentBucket::Negative,
            SentimentBucket::Neutral,
            SentimentBucket::Positive,
            SentimentBucket::VeryPositive,
        ]
    }

    /// Display label, e.g. `Too Negative`.
    pub fn label(self) -> &'static str {
        match self {
            SentimentBucket::TooNegative => "Too Negative",
            SentimentBucket::Negative => "Negative",
            SentimentBucket::Neutral => "Neutral",
            SentimentBucket::Positive => "Positive",
            SentimentBucket::VeryPositive => "Very Positive",
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Built-in polarity lexicon, values in `[-1, 1]`.
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("perfect", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("cool", 0.35),
    ("fun", 0.3),
    ("happy", 0.8),
    ("glad", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("like", 0.2),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("beautiful", 0.85),
    ("congrats", 0.6),
    ("congratulations", 0.6),
    ("yay", 0.6),
    ("enjoy", 0.4),
    ("enjoyed", 0.5),
    ("welcome", 0.8),
    ("brilliant", 0.9),
    ("sweet", 0.35),
    ("cute", 0.5),
    ("funny", 0.25),
    ("glorious", 0.6),
    ("helpful", 0.4),
    ("kind", 0.6),
    ("win", 0.8),
    ("ok", 0.5),
    ("okay", 0.5),
    ("fine", 0.4),
    // negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("hate", -0.8),
    ("hated", -0.9),
    ("sad", -0.5),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("annoyed", -0.4),
    ("boring", -1.0),
    ("bored", -0.5),
    ("sorry", -0.5),
    ("wrong", -0.5),
    ("stupid", -0.8),
    ("ugly", -0.7),
    ("sick", -0.7),
    ("tired", -0.4),
    ("upset", -0.4),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("pathetic", -1.0),
    ("useless", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("problem", -0.3),
    ("worried", -0.4),
    ("scared", -0.5),
    ("lonely", -0.4),
    ("hurt", -0.5),
    ("damn", -0.4),
    ("ugh", -0.5),
    ("crap", -0.8),
];

/// Words that flip and dampen the next sentiment word.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "dont", "cant", "wont",
    "isnt", "didnt", "doesnt", "wasnt", "arent",
];

/// Words that amplify the next sentiment word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("extremely", 1.5),
    ("super", 1.4),
    ("totally", 1.3),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.7),
];

/// Polarity multiplier for a negated word.
const NEGATION_FACTOR: f64 = -0.5;

static LEXICON_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| LEXICON.iter().copied().collect());

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't") || token.ends_with("n\u{2019}t")
}

fn intensity(token: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find_map(|&(word, factor)| (word == token).then_some(factor))
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Averaging word-list scorer.
///
/// Each known word contributes its lexicon polarity, multiplied by a
/// preceding intensifier (`very good`) and flipped by a preceding negator
/// (`not good`). The score is the mean over contributing words, or `0.0`
/// when none are known.
///
/// # Example
///
/// ```rust
/// use chatstat::core::sentiment::{LexiconScorer, SentimentScorer};
///
/// let scorer = LexiconScorer::new();
/// assert!(scorer.score("this is great") > 0.6);
/// assert!(scorer.score("this is not great") < 0.0);
/// assert_eq!(scorer.score("see you at noon"), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    overrides: HashMap<String, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a word's polarity. The value is clamped to `[-1, 1]`.
    #[must_use]
    pub fn with_word(mut self, word: impl Into<String>, polarity: f64) -> Self {
        self.overrides
            .insert(word.into().to_lowercase(), polarity.clamp(-1.0, 1.0));
        self
    }

    fn lookup(&self, token: &str) -> Option<f64> {
        self.overrides
            .get(token)
            .or_else(|| LEXICON_MAP.get(token))
            .copied()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut total = 0.0;
        let mut hits = 0u32;

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut polarity) = self.lookup(token) else {
                continue;
            };

            let mut back = i;
            if let Some(factor) = back.checked_sub(1).and_then(|j| intensity(&tokens[j])) {
                polarity *= factor;
                back -= 1;
            }
            if back.checked_sub(1).is_some_and(|j| is_negator(&tokens[j])) {
                polarity *= NEGATION_FACTOR;
            }

            total += polarity.clamp(-1.0, 1.0);
            hits += 1;
        }

        if hits == 0 {
            0.0
        } else {
            total / f64::from(hits)
        }
    }
}
