//! Per-row results writer.

use csv::{Terminator, WriterBuilder};
use snafu::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::analysis::AnalyzedRow;
use crate::emit;
use crate::error::{CreateFileSnafu, FlushSnafu, SinkError, WriteSnafu};
use crate::metrics::events::RowsWritten;

/// Column order of the per-row results file.
pub const ROW_HEADER: [&str; 6] = ["text", "neg", "neu", "pos", "compound", "emoji_count"];

/// Writes one CSV row per [`AnalyzedRow`], truncating any existing file.
///
/// The header is written on creation, so a run over an empty input still
/// leaves a header-only file behind.
pub struct RowWriter {
    path: String,
    writer: csv::Writer<File>,
    rows_written: usize,
}

impl RowWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().display().to_string();
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .from_path(&path)
            .context(CreateFileSnafu { path: &path })?;
        writer
            .write_record(ROW_HEADER)
            .context(WriteSnafu { path: &path })?;

        Ok(Self {
            path,
            writer,
            rows_written: 0,
        })
    }

    pub fn write(&mut self, row: &AnalyzedRow) -> Result<(), SinkError> {
        self.writer
            .serialize(row)
            .context(WriteSnafu { path: &self.path })?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush everything to disk and return the number of data rows written.
    pub fn finish(mut self) -> Result<usize, SinkError> {
        self.writer
            .flush()
            .context(FlushSnafu { path: &self.path })?;
        emit!(RowsWritten {
            count: self.rows_written as u64,
        });
        Ok(self.rows_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(text: &str, compound: f64, emoji_count: usize) -> AnalyzedRow {
        AnalyzedRow {
            text: text.to_string(),
            negative: 0.0,
            neutral: 0.5,
            positive: 0.5,
            compound,
            emoji_count,
        }
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");
        let written = RowWriter::create(&path).unwrap().finish().unwrap();
        assert_eq!(written, 0);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "text,neg,neu,pos,compound,emoji_count\r\n"
        );
    }

    #[test]
    fn test_rows_in_order_with_quoting() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");
        let mut writer = RowWriter::create(&path).unwrap();
        writer.write(&row("first, with comma", 0.25, 0)).unwrap();
        writer.write(&row("second 😀", -0.5, 1)).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "text,neg,neu,pos,compound,emoji_count",
                "\"first, with comma\",0.0,0.5,0.5,0.25,0",
                "second 😀,0.0,0.5,0.5,-0.5,1",
            ]
        );
    }

    #[test]
    fn test_existing_file_is_truncated() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");
        std::fs::write(&path, "stale content\nmore stale content\n").unwrap();

        let mut writer = RowWriter::create(&path).unwrap();
        writer.write(&row("fresh", 0.0, 0)).unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 2);
    }
}
