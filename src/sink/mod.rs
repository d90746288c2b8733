//! Output side of the pipeline.
//!
//! Two CSV files are produced: the per-row results, rewritten on every run,
//! and the summary, which gains one row per run.

pub mod rows;
pub mod summary;

use snafu::prelude::*;
use std::path::Path;
use tracing::debug;

use crate::error::{CreateDirSnafu, SinkError};

pub use rows::RowWriter;
pub use summary::{SummaryRow, SummaryWriter};

/// Create the output directory and its parents if they do not exist.
pub fn ensure_output_dir(dir: impl AsRef<Path>) -> Result<(), SinkError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).context(CreateDirSnafu {
        path: dir.display().to_string(),
    })?;
    debug!("Output directory ready: {}", dir.display());
    Ok(())
}
