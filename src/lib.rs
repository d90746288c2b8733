//! flurry: batch sentiment and emoji analysis of tweet CSV exports.
//!
//! Reads records with `Text`, `Likes` and `Retweets` columns, scores each
//! text, counts its emoji runs, writes an enriched per-row CSV and appends
//! one aggregate row to a running summary CSV.
//!
//! # Example
//!
//! ```ignore
//! use flurry::{Config, run_pipeline, error::PipelineError};
//!
//! fn main() -> Result<(), PipelineError> {
//!     let config = Config::from_file("flurry.yaml")?;
//!     let stats = run_pipeline(config)?;
//!     println!("Processed {} rows", stats.rows_processed);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod tracing;

// Re-export main types
pub use aggregate::{AggregateState, EmojiBucket, Summary};
pub use analysis::{AnalyzedRow, RowAnalyzer, SentimentScore, SentimentScorer};
pub use config::Config;
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineStats, run_pipeline};
pub use crate::tracing::init_tracing;
