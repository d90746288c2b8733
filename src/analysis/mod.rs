//! Per-row analysis.
//!
//! Sentiment scoring and emoji counting are pluggable through the
//! [`SentimentScorer`] and [`EmojiCounter`] traits. [`RowAnalyzer`] combines
//! them into one [`AnalyzedRow`] per input record.

pub mod emoji;
pub mod lexicon;

use serde::Serialize;

use crate::source::InputRecord;

pub use emoji::{EmojiRunCounter, count_emoji_runs};
pub use lexicon::LexiconScorer;

/// Sentiment of one text.
///
/// `negative`, `neutral` and `positive` are proportions that sum to about 1.
/// `compound` is the normalized polarity in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SentimentScore {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

/// Maps text to a [`SentimentScore`]. Must be a pure function of the text.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> SentimentScore;
}

/// Maps text to a number of emoji occurrences.
pub trait EmojiCounter {
    fn count(&self, text: &str) -> usize;
}

/// One analyzed row, written verbatim to the per-row output.
///
/// Field order is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedRow {
    pub text: String,
    #[serde(rename = "neg")]
    pub negative: f64,
    #[serde(rename = "neu")]
    pub neutral: f64,
    #[serde(rename = "pos")]
    pub positive: f64,
    pub compound: f64,
    pub emoji_count: usize,
}

impl AnalyzedRow {
    pub fn new(text: String, score: SentimentScore, emoji_count: usize) -> Self {
        Self {
            text,
            negative: score.negative,
            neutral: score.neutral,
            positive: score.positive,
            compound: score.compound,
            emoji_count,
        }
    }

    pub fn has_emoji(&self) -> bool {
        self.emoji_count > 0
    }
}

/// Runs the scorer and the emoji counter over each record.
#[derive(Debug, Clone, Default)]
pub struct RowAnalyzer<S = LexiconScorer, E = EmojiRunCounter> {
    scorer: S,
    counter: E,
}

impl RowAnalyzer {
    /// Analyzer using the built-in lexicon and emoji block pattern.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, E> RowAnalyzer<S, E>
where
    S: SentimentScorer,
    E: EmojiCounter,
{
    /// Analyzer with custom collaborators.
    pub fn with_parts(scorer: S, counter: E) -> Self {
        Self { scorer, counter }
    }

    /// Analyze one record.
    pub fn analyze(&self, record: &InputRecord) -> AnalyzedRow {
        let score = self.scorer.score(&record.text);
        let emoji_count = self.counter.count(&record.text);
        AnalyzedRow::new(record.text.clone(), score, emoji_count)
    }
}
