//! Running statistics over analyzed rows.
//!
//! [`AggregateState`] is fed once per row through [`AggregateState::observe`]
//! and read once at the end through [`AggregateState::summarize`]. Averages
//! are kept as running sums, so memory does not grow with the input.

use std::fmt;

use crate::analysis::AnalyzedRow;

/// Emoji-count category of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmojiBucket {
    Zero,
    One,
    Two,
    Three,
    Four,
    MoreThanFour,
}

impl EmojiBucket {
    pub const ALL: [EmojiBucket; 6] = [
        EmojiBucket::Zero,
        EmojiBucket::One,
        EmojiBucket::Two,
        EmojiBucket::Three,
        EmojiBucket::Four,
        EmojiBucket::MoreThanFour,
    ];

    /// Classify an emoji run count.
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => EmojiBucket::Zero,
            1 => EmojiBucket::One,
            2 => EmojiBucket::Two,
            3 => EmojiBucket::Three,
            4 => EmojiBucket::Four,
            _ => EmojiBucket::MoreThanFour,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiBucket::Zero => "0",
            EmojiBucket::One => "1",
            EmojiBucket::Two => "2",
            EmojiBucket::Three => "3",
            EmojiBucket::Four => "4",
            EmojiBucket::MoreThanFour => "more_than_4",
        }
    }
}

impl fmt::Display for EmojiBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running mean: sum and count.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mean {
    sum: f64,
    count: u64,
}

impl Mean {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the pushed values, or 0 when nothing was pushed.
    pub fn value(&self) -> f64 {
        ratio(self.sum, self.count)
    }
}

/// Running minimum and maximum. Unset until the first value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extrema {
    bounds: Option<(i128, i128)>,
}

impl Extrema {
    pub fn push(&mut self, value: i128) {
        self.bounds = Some(match self.bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    /// Smallest value seen, or 0 when nothing was pushed.
    pub fn min(&self) -> i128 {
        self.bounds.map_or(0, |(min, _)| min)
    }

    /// Largest value seen, or 0 when nothing was pushed.
    pub fn max(&self) -> i128 {
        self.bounds.map_or(0, |(_, max)| max)
    }
}

/// Row counts per [`EmojiBucket`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts([u64; 6]);

impl BucketCounts {
    pub fn increment(&mut self, bucket: EmojiBucket) {
        self.0[bucket.index()] += 1;
    }

    pub fn get(&self, bucket: EmojiBucket) -> u64 {
        self.0[bucket.index()]
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

/// Accumulated state of one run.
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    compound: Mean,
    compound_with_emoji: Mean,
    compound_without_emoji: Mean,
    likes: Extrema,
    retweets: Extrema,
    mean_likes: Mean,
    mean_retweets: Mean,
    total_emoji: u64,
    buckets: BucketCounts,
    rows: u64,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one analyzed row and its engagement counts into the state.
    ///
    /// Engagement averages are summed as `f64`, so arbitrarily large counts
    /// lose precision instead of overflowing.
    pub fn observe(&mut self, row: &AnalyzedRow, likes: i128, retweets: i128) {
        self.compound.push(row.compound);
        if row.has_emoji() {
            self.compound_with_emoji.push(row.compound);
        } else {
            self.compound_without_emoji.push(row.compound);
        }

        self.likes.push(likes);
        self.retweets.push(retweets);
        self.mean_likes.push(likes as f64);
        self.mean_retweets.push(retweets as f64);
        self.total_emoji += row.emoji_count as u64;

        self.buckets.increment(EmojiBucket::for_count(row.emoji_count));
        self.rows += 1;
    }

    /// Number of rows observed.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Derive the end-of-run figures. Every average is 0 when its count is 0.
    pub fn summarize(&self) -> Summary {
        Summary {
            average_compound: self.compound.value(),
            highest_likes: self.likes.max(),
            lowest_likes: self.likes.min(),
            highest_retweets: self.retweets.max(),
            lowest_retweets: self.retweets.min(),
            tweet_count: self.rows,
            average_likes: self.mean_likes.value(),
            average_retweets: self.mean_retweets.value(),
            avg_compound_with_emojis: self.compound_with_emoji.value(),
            avg_compound_without_emojis: self.compound_without_emoji.value(),
            avg_emoji_count: ratio(self.total_emoji as f64, self.rows),
            with_emoji_count: self.compound_with_emoji.count(),
            without_emoji_count: self.compound_without_emoji.count(),
            buckets: self.buckets,
        }
    }
}

/// End-of-run statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub average_compound: f64,
    pub highest_likes: i128,
    pub lowest_likes: i128,
    pub highest_retweets: i128,
    pub lowest_retweets: i128,
    pub tweet_count: u64,
    pub average_likes: f64,
    pub average_retweets: f64,
    pub avg_compound_with_emojis: f64,
    pub avg_compound_without_emojis: f64,
    pub avg_emoji_count: f64,
    pub with_emoji_count: u64,
    pub without_emoji_count: u64,
    pub buckets: BucketCounts,
}

fn ratio(sum: f64, count: u64) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(compound: f64, emoji_count: usize) -> AnalyzedRow {
        AnalyzedRow {
            text: String::new(),
            negative: 0.0,
            neutral: 1.0,
            positive: 0.0,
            compound,
            emoji_count,
        }
    }

    #[test]
    fn test_bucket_classification() {
        let expected = [
            (0, EmojiBucket::Zero),
            (1, EmojiBucket::One),
            (2, EmojiBucket::Two),
            (3, EmojiBucket::Three),
            (4, EmojiBucket::Four),
            (5, EmojiBucket::MoreThanFour),
            (7, EmojiBucket::MoreThanFour),
            (1000, EmojiBucket::MoreThanFour),
        ];
        for (count, bucket) in expected {
            assert_eq!(EmojiBucket::for_count(count), bucket, "count {count}");
        }
    }

    #[test]
    fn test_empty_state_reports_zeros() {
        let summary = AggregateState::new().summarize();
        assert_eq!(summary.tweet_count, 0);
        assert_eq!(summary.average_compound, 0.0);
        assert_eq!(summary.average_likes, 0.0);
        assert_eq!(summary.average_retweets, 0.0);
        assert_eq!(summary.avg_compound_with_emojis, 0.0);
        assert_eq!(summary.avg_compound_without_emojis, 0.0);
        assert_eq!(summary.avg_emoji_count, 0.0);
        assert_eq!(summary.highest_likes, 0);
        assert_eq!(summary.lowest_likes, 0);
        assert_eq!(summary.highest_retweets, 0);
        assert_eq!(summary.lowest_retweets, 0);
        assert_eq!(summary.buckets.total(), 0);
        assert!(!summary.average_compound.is_nan());
    }

    #[test]
    fn test_emoji_split_and_buckets() {
        let mut state = AggregateState::new();
        state.observe(&row(0.5, 0), 1, 1);
        state.observe(&row(-0.5, 7), 1, 1);

        let summary = state.summarize();
        assert_eq!(summary.without_emoji_count, 1);
        assert_eq!(summary.with_emoji_count, 1);
        assert_eq!(summary.avg_compound_without_emojis, 0.5);
        assert_eq!(summary.avg_compound_with_emojis, -0.5);
        assert_eq!(summary.buckets.get(EmojiBucket::Zero), 1);
        assert_eq!(summary.buckets.get(EmojiBucket::MoreThanFour), 1);
        assert_eq!(summary.avg_emoji_count, 3.5);
    }

    #[test]
    fn test_only_with_emoji_rows() {
        let mut state = AggregateState::new();
        state.observe(&row(0.2, 1), 3, 4);
        let summary = state.summarize();
        assert_eq!(summary.avg_compound_without_emojis, 0.0);
        assert_eq!(summary.avg_compound_with_emojis, 0.2);
    }

    #[test]
    fn test_extrema_and_averages() {
        let mut state = AggregateState::new();
        state.observe(&row(0.6, 0), 10, 2);
        state.observe(&row(-0.3, 1), 0, 0);
        state.observe(&row(0.0, 0), 5, 5);

        let summary = state.summarize();
        assert_eq!(summary.tweet_count, 3);
        assert_eq!(summary.highest_likes, 10);
        assert_eq!(summary.lowest_likes, 0);
        assert_eq!(summary.highest_retweets, 5);
        assert_eq!(summary.lowest_retweets, 0);
        assert_eq!(summary.average_likes, 5.0);
        assert!((summary.average_retweets - 7.0 / 3.0).abs() < 1e-12);
        assert!((summary.average_compound - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_negative_engagement_extrema() {
        let mut state = AggregateState::new();
        state.observe(&row(0.0, 0), -4, -1);
        state.observe(&row(0.0, 0), -2, -9);
        let summary = state.summarize();
        assert_eq!(summary.highest_likes, -2);
        assert_eq!(summary.lowest_likes, -4);
        assert_eq!(summary.highest_retweets, -1);
        assert_eq!(summary.lowest_retweets, -9);
    }

    #[test]
    fn test_counts_are_consistent() {
        let mut state = AggregateState::new();
        for (i, emoji) in [0, 1, 2, 3, 4, 5, 6, 0, 2, 9].into_iter().enumerate() {
            state.observe(&row(0.1 * i as f64, emoji), i as i128, 0);
        }
        let summary = state.summarize();
        assert_eq!(summary.buckets.total(), summary.tweet_count);
        assert_eq!(
            summary.with_emoji_count + summary.without_emoji_count,
            summary.tweet_count
        );
        let per_bucket: Vec<u64> = EmojiBucket::ALL
            .iter()
            .map(|b| summary.buckets.get(*b))
            .collect();
        assert_eq!(per_bucket, vec![2, 1, 2, 1, 1, 3]);
    }

    #[test]
    fn test_engagement_beyond_i64_does_not_overflow() {
        let mut state = AggregateState::new();
        state.observe(&row(0.0, 0), i64::MAX as i128, 0);
        state.observe(&row(0.0, 0), 1, 0);
        state.observe(&row(0.0, 0), 99_999_999_999_999_999_999, -5);

        let summary = state.summarize();
        assert_eq!(summary.highest_likes, 99_999_999_999_999_999_999);
        assert_eq!(summary.lowest_likes, 1);
        assert_eq!(summary.lowest_retweets, -5);
        let expected = (i64::MAX as f64 + 1.0 + 1e20) / 3.0;
        assert!((summary.average_likes - expected).abs() / expected < 1e-12);
    }
}
