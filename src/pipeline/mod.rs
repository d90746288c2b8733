//! Main processing pipeline.
//!
//! A single sequential pass: read a record, analyze it, fold it into the
//! aggregate state and write its result row. Once the input is exhausted the
//! summary row is appended. A failure while reading leaves the per-row file
//! with whatever was written so far and does not touch the summary file.

use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::{debug, info, trace};

use crate::aggregate::{AggregateState, Summary};
use crate::analysis::{EmojiCounter, EmojiRunCounter, LexiconScorer, RowAnalyzer, SentimentScorer};
use crate::config::Config;
use crate::emit;
use crate::error::PipelineError;
use crate::metrics::events::RowsAnalyzed;
use crate::sink::{RowWriter, SummaryRow, SummaryWriter, ensure_output_dir};
use crate::source::CsvRecordReader;

/// Statistics about the pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    pub rows_processed: u64,
    pub rows_written: usize,
    pub rows_path: PathBuf,
    pub summary_path: PathBuf,
    /// Whether this run created the summary file.
    pub summary_created: bool,
    pub summary: Summary,
}

/// A configured run over one input file.
pub struct Pipeline<S = LexiconScorer, E = EmojiRunCounter> {
    config: Config,
    analyzer: RowAnalyzer<S, E>,
    run_date: Option<NaiveDate>,
}

impl Pipeline {
    /// Pipeline with the built-in scorer and emoji counter.
    pub fn from_config(config: Config) -> Self {
        Self::with_analyzer(config, RowAnalyzer::new())
    }
}

impl<S, E> Pipeline<S, E>
where
    S: SentimentScorer,
    E: EmojiCounter,
{
    pub fn with_analyzer(config: Config, analyzer: RowAnalyzer<S, E>) -> Self {
        Self {
            config,
            analyzer,
            run_date: None,
        }
    }

    /// Fix the date recorded in the summary instead of using today's.
    pub fn with_run_date(mut self, date: NaiveDate) -> Self {
        self.run_date = Some(date);
        self
    }

    /// Execute the run.
    pub fn run(&self) -> Result<PipelineStats, PipelineError> {
        let output = &self.config.output;
        let rows_path = output.rows_path();
        let summary_path = output.summary_path();

        ensure_output_dir(&output.dir)?;

        let reader = CsvRecordReader::open(&self.config.source.path)?;
        let mut row_writer = RowWriter::create(&rows_path)?;
        let mut state = AggregateState::new();

        for record in reader {
            let record = record?;
            let row = self.analyzer.analyze(&record);
            trace!(
                compound = row.compound,
                emoji_count = row.emoji_count,
                "Analyzed row {}",
                state.rows() + 1
            );
            emit!(RowsAnalyzed {
                count: 1,
                emoji_runs: row.emoji_count as u64,
            });

            state.observe(&row, record.likes, record.retweets);
            row_writer.write(&row)?;
        }

        let rows_written = row_writer.finish()?;
        debug!(
            "Processed {} rows from {}",
            state.rows(),
            self.config.source.path
        );

        let summary = state.summarize();
        let date = self
            .run_date
            .unwrap_or_else(|| Local::now().date_naive())
            .format(&output.date_format)
            .to_string();
        let summary_row = SummaryRow::new(&self.config.source.query, date, &summary);
        let summary_created = SummaryWriter::new(&summary_path).append(&summary_row)?;

        info!(
            "Sentiment analysis completed. Results saved to {}",
            rows_path.display()
        );
        info!("Query and summary appended to {}", summary_path.display());

        Ok(PipelineStats {
            rows_processed: state.rows(),
            rows_written,
            rows_path,
            summary_path,
            summary_created,
            summary,
        })
    }
}

/// Run the pipeline with the built-in analyzer.
pub fn run_pipeline(config: Config) -> Result<PipelineStats, PipelineError> {
    Pipeline::from_config(config).run()
}
