//! Run summary writer.
//!
//! The summary file accumulates across runs. The header is written only when
//! the file does not exist yet; every call appends exactly one data row.

use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use snafu::prelude::*;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::aggregate::{EmojiBucket, Summary};
use crate::emit;
use crate::error::{FlushSnafu, OpenAppendSnafu, SinkError, WriteSnafu};
use crate::metrics::events::SummaryAppended;

/// Column order of the summary file.
pub const SUMMARY_HEADER: [&str; 19] = [
    "query",
    "date",
    "average_compound",
    "highest_likes",
    "lowest_likes",
    "highest_retweets",
    "lowest_retweets",
    "tweet_count",
    "average_likes",
    "average_retweets",
    "avg_compound_with_emojis",
    "avg_compound_without_emojis",
    "avg_emoji_count",
    "emoji_0_count",
    "emoji_1_count",
    "emoji_2_count",
    "emoji_3_count",
    "emoji_4_count",
    "emoji_more_than_4_count",
];

/// One line of the summary file. Field order matches [`SUMMARY_HEADER`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub query: String,
    pub date: String,
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
    pub emoji_0_count: u64,
    pub emoji_1_count: u64,
    pub emoji_2_count: u64,
    pub emoji_3_count: u64,
    pub emoji_4_count: u64,
    pub emoji_more_than_4_count: u64,
}

impl SummaryRow {
    pub fn new(query: impl Into<String>, date: impl Into<String>, summary: &Summary) -> Self {
        let bucket = |b| summary.buckets.get(b);
        Self {
            query: query.into(),
            date: date.into(),
            average_compound: summary.average_compound,
            highest_likes: summary.highest_likes,
            lowest_likes: summary.lowest_likes,
            highest_retweets: summary.highest_retweets,
            lowest_retweets: summary.lowest_retweets,
            tweet_count: summary.tweet_count,
            average_likes: summary.average_likes,
            average_retweets: summary.average_retweets,
            avg_compound_with_emojis: summary.avg_compound_with_emojis,
            avg_compound_without_emojis: summary.avg_compound_without_emojis,
            avg_emoji_count: summary.avg_emoji_count,
            emoji_0_count: bucket(EmojiBucket::Zero),
            emoji_1_count: bucket(EmojiBucket::One),
            emoji_2_count: bucket(EmojiBucket::Two),
            emoji_3_count: bucket(EmojiBucket::Three),
            emoji_4_count: bucket(EmojiBucket::Four),
            emoji_more_than_4_count: bucket(EmojiBucket::MoreThanFour),
        }
    }
}

/// Appends [`SummaryRow`]s to a long-lived CSV file.
#[derive(Debug, Clone)]
pub struct SummaryWriter {
    path: PathBuf,
}

impl SummaryWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first if the file is new.
    ///
    /// Returns whether the header was written.
    pub fn append(&self, row: &SummaryRow) -> Result<bool, SinkError> {
        let path = self.path.display().to_string();
        let is_new = !self.path.is_file();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .context(OpenAppendSnafu { path: &path })?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .from_writer(file);

        if is_new {
            writer
                .write_record(SUMMARY_HEADER)
                .context(WriteSnafu { path: &path })?;
            debug!("Created summary file {}", path);
        }
        writer.serialize(row).context(WriteSnafu { path: &path })?;

        let mut file = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context(FlushSnafu { path: &path })?;
        file.flush().context(FlushSnafu { path: &path })?;

        emit!(SummaryAppended {
            header_written: is_new,
        });
        Ok(is_new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregateState;

    fn empty_row(date: &str) -> SummaryRow {
        SummaryRow::new("sample_data", date, &AggregateState::new().summarize())
    }

    #[test]
    fn test_header_matches_row_fields() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("summary.csv");
        SummaryWriter::new(&path).append(&empty_row("19-10-2026")).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, SUMMARY_HEADER);

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), SUMMARY_HEADER.len());
        assert_eq!(&records[0][0], "sample_data");
        assert_eq!(&records[0][1], "19-10-2026");
        assert_eq!(&records[0][7], "0");
    }

    #[test]
    fn test_bucket_columns_follow_bucket_names() {
        let expected: Vec<String> = EmojiBucket::ALL
            .iter()
            .map(|bucket| format!("emoji_{bucket}_count"))
            .collect();
        assert_eq!(expected, SUMMARY_HEADER[13..]);
    }

    #[test]
    fn test_header_written_once() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let writer = SummaryWriter::new(temp_dir.path().join("summary.csv"));

        assert!(writer.append(&empty_row("01-01-2026")).unwrap());
        assert!(!writer.append(&empty_row("01-01-2026")).unwrap());
        assert!(!writer.append(&empty_row("02-01-2026")).unwrap());

        let content = std::fs::read_to_string(writer.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("query,date,average_compound"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("query,")).count(), 1);
        // Same-day runs are not deduplicated.
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn test_appends_to_existing_file_without_header() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("summary.csv");
        std::fs::write(&path, "legacy header\r\nlegacy row\r\n").unwrap();

        let header_written = SummaryWriter::new(&path)
            .append(&empty_row("05-05-2026"))
            .unwrap();
        assert!(!header_written);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("legacy header\r\nlegacy row\r\n"));
        assert!(content.ends_with("0,0,0,0,0,0\r\n"));
        assert_eq!(content.lines().count(), 3);
    }
}
