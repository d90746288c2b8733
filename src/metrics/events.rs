//! Internal events for metrics emission.
//!
//! Each event struct represents a measurable occurrence in a run.

use metrics::counter;
use tracing::trace;

/// Trait for internal events that can be emitted as metrics.
pub trait InternalEvent {
    /// Emit this event as a metric.
    fn emit(self);
}

/// Rows passed through the analyzer.
pub struct RowsAnalyzed {
    pub count: u64,
    pub emoji_runs: u64,
}

impl InternalEvent for RowsAnalyzed {
    fn emit(self) {
        trace!(
            count = self.count,
            emoji_runs = self.emoji_runs,
            "Rows analyzed"
        );
        counter!("flurry_rows_analyzed_total").increment(self.count);
        counter!("flurry_emoji_runs_total").increment(self.emoji_runs);
    }
}

/// Rows flushed to the per-row results file.
pub struct RowsWritten {
    pub count: u64,
}

impl InternalEvent for RowsWritten {
    fn emit(self) {
        trace!(count = self.count, "Rows written");
        counter!("flurry_rows_written_total").increment(self.count);
    }
}

/// A row appended to the summary file.
pub struct SummaryAppended {
    pub header_written: bool,
}

impl InternalEvent for SummaryAppended {
    fn emit(self) {
        let header = if self.header_written { "written" } else { "existing" };
        trace!(header, "Summary appended");
        counter!("flurry_summaries_appended_total", "header" => header).increment(1);
    }
}
