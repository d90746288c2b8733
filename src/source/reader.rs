//! Tweet CSV reader.
//!
//! Yields one [`InputRecord`] per data row, in file order. Columns are looked
//! up by exact header name; any other columns are ignored.

use csv::{ReaderBuilder, StringRecord};
use snafu::prelude::*;
use std::fs::File;
use std::num::ParseIntError;
use std::path::Path;
use tracing::debug;

use crate::error::{
    HeadersSnafu, InputUnavailableSnafu, InvalidIntegerSnafu, MissingColumnSnafu, ReaderError,
    RecordSnafu,
};

pub const TEXT_COLUMN: &str = "Text";
pub const LIKES_COLUMN: &str = "Likes";
pub const RETWEETS_COLUMN: &str = "Retweets";

/// One input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub text: String,
    pub likes: i128,
    pub retweets: i128,
}

/// Positions of the required columns in the header row.
///
/// A column absent from the header only becomes an error once a data row
/// needs it, so a header-only file without `Text` still reads as empty.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    text: Option<usize>,
    likes: Option<usize>,
    retweets: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            text: find(TEXT_COLUMN),
            likes: find(LIKES_COLUMN),
            retweets: find(RETWEETS_COLUMN),
        }
    }
}

/// Streaming reader over the input CSV.
pub struct CsvRecordReader {
    path: String,
    reader: csv::Reader<File>,
    columns: ColumnIndex,
    record: StringRecord,
    done: bool,
}

impl CsvRecordReader {
    /// Open the input file and read its header row.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let path_str = path.as_ref().display().to_string();

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path.as_ref())
            .context(InputUnavailableSnafu { path: &path_str })?;

        let headers = reader
            .headers()
            .context(HeadersSnafu { path: &path_str })?;
        let columns = ColumnIndex::from_headers(headers);
        debug!("Opened {} with columns {:?}", path_str, headers);

        Ok(Self {
            path: path_str,
            reader,
            columns,
            record: StringRecord::new(),
            done: false,
        })
    }

    fn read_next(&mut self) -> Result<Option<InputRecord>, ReaderError> {
        let has_row = self
            .reader
            .read_record(&mut self.record)
            .context(RecordSnafu { path: &self.path })?;
        if !has_row {
            return Ok(None);
        }

        let line = self.record.position().map_or(0, |p| p.line());
        let text = field(&self.record, self.columns.text, TEXT_COLUMN, line)?;
        let likes = integer_field(&self.record, self.columns.likes, LIKES_COLUMN, line)?;
        let retweets = integer_field(&self.record, self.columns.retweets, RETWEETS_COLUMN, line)?;

        Ok(Some(InputRecord {
            text: text.to_string(),
            likes,
            retweets,
        }))
    }
}

impl Iterator for CsvRecordReader {
    type Item = Result<InputRecord, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.read_next().transpose();
        // Not restartable: stop after the end of input or the first failure.
        if !matches!(result, Some(Ok(_))) {
            self.done = true;
        }
        result
    }
}

fn field<'r>(
    record: &'r StringRecord,
    index: Option<usize>,
    column: &str,
    line: u64,
) -> Result<&'r str, ReaderError> {
    index
        .and_then(|i| record.get(i))
        .context(MissingColumnSnafu { column, line })
}

fn integer_field(
    record: &StringRecord,
    index: Option<usize>,
    column: &str,
    line: u64,
) -> Result<i128, ReaderError> {
    let raw = field(record, index, column, line)?;
    parse_count(raw).context(InvalidIntegerSnafu {
        column,
        value: raw,
        line,
    })
}

/// Parse an engagement count.
///
/// Surrounding whitespace is ignored and single underscores between digits
/// are accepted as group separators (`1_000`). Values outside the `i128`
/// range are rejected.
fn parse_count(raw: &str) -> Result<i128, ParseIntError> {
    let trimmed = raw.trim();
    if !trimmed.contains('_') {
        return trimmed.parse();
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let well_grouped = unsigned
        .split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if well_grouped {
        trimmed.replace('_', "").parse()
    } else {
        // Misplaced separators fail as an invalid digit.
        trimmed.parse()
    }
}
