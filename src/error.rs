//! Error types for flurry using snafu.
//!
//! This module defines structured error types with context selectors for
//! all error conditions in the codebase.

use snafu::prelude::*;

// ============ Config Errors ============

/// Errors that can occur during configuration parsing and validation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    /// Input path is empty.
    #[snafu(display("Input path cannot be empty"))]
    EmptyInputPath,

    /// Output directory is empty.
    #[snafu(display("Output directory cannot be empty"))]
    EmptyOutputDir,

    /// Query label is empty.
    #[snafu(display("Query label cannot be empty"))]
    EmptyQuery,

    /// One of the output file names is empty.
    #[snafu(display("Output file name for {which} cannot be empty"))]
    EmptyFileName { which: String },

    /// Summary date format is not a valid strftime pattern.
    #[snafu(display("Invalid date format {format:?}"))]
    InvalidDateFormat { format: String },

    /// Environment variable interpolation failed.
    #[snafu(display("Environment variable interpolation failed:\n{message}"))]
    EnvInterpolation { message: String },

    /// Failed to parse YAML configuration.
    #[snafu(display("Failed to parse YAML configuration"))]
    YamlParse { source: serde_yaml::Error },

    /// Failed to read configuration file.
    #[snafu(display("Failed to read configuration file"))]
    ReadFile { source: std::io::Error },
}

// ============ Reader Errors ============

/// Errors that can occur while reading the input CSV.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ReaderError {
    /// Input file is missing or cannot be opened.
    #[snafu(display("Input file {path} is unavailable"))]
    InputUnavailable { path: String, source: csv::Error },

    /// Header row could not be read.
    #[snafu(display("Failed to read header row of {path}"))]
    Headers { path: String, source: csv::Error },

    /// A required column is missing from the header or from a row.
    #[snafu(display("Missing required column '{column}' at line {line}"))]
    MissingColumn { column: String, line: u64 },

    /// A numeric column could not be parsed as an integer.
    #[snafu(display("Invalid integer {value:?} in column '{column}' at line {line}"))]
    InvalidInteger {
        column: String,
        value: String,
        line: u64,
        source: std::num::ParseIntError,
    },

    /// A record could not be decoded.
    #[snafu(display("Failed to read record from {path}"))]
    Record { path: String, source: csv::Error },
}

// ============ Sink Errors ============

/// Errors that can occur while writing output files.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// Output directory could not be created.
    #[snafu(display("Failed to create output directory {path}"))]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    /// Output file could not be created.
    #[snafu(display("Failed to create {path}"))]
    CreateFile { path: String, source: csv::Error },

    /// Summary file could not be opened for appending.
    #[snafu(display("Failed to open {path} for appending"))]
    OpenAppend {
        path: String,
        source: std::io::Error,
    },

    /// A row could not be written.
    #[snafu(display("Failed to write row to {path}"))]
    Write { path: String, source: csv::Error },

    /// Buffered rows could not be flushed.
    #[snafu(display("Failed to flush {path}"))]
    Flush {
        path: String,
        source: std::io::Error,
    },
}

// ============ Pipeline Error (top-level) ============

/// Top-level pipeline errors that aggregate all error types.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PipelineError {
    /// Configuration error.
    #[snafu(display("Configuration error"))]
    Config { source: ConfigError },

    /// Reader error.
    #[snafu(display("Reader error"))]
    Reader { source: ReaderError },

    /// Sink error.
    #[snafu(display("Sink error"))]
    Sink { source: SinkError },

    /// Log file could not be opened.
    #[snafu(display("Failed to open log file {path}"))]
    Logging {
        path: String,
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Check if this error means the input file could not be opened.
    pub fn is_input_unavailable(&self) -> bool {
        matches!(
            self,
            PipelineError::Reader {
                source: ReaderError::InputUnavailable { .. }
            }
        )
    }
}

impl From<ConfigError> for PipelineError {
    fn from(source: ConfigError) -> Self {
        PipelineError::Config { source }
    }
}

impl From<ReaderError> for PipelineError {
    fn from(source: ReaderError) -> Self {
        PipelineError::Reader { source }
    }
}

impl From<SinkError> for PipelineError {
    fn from(source: SinkError) -> Self {
        PipelineError::Sink { source }
    }
}
